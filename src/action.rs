use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::CoupError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Income,
    ForeignAid,
    Tax,
    Exchange,
    Steal,
    Assassinate,
    Coup,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Income,
        Action::ForeignAid,
        Action::Tax,
        Action::Exchange,
        Action::Steal,
        Action::Assassinate,
        Action::Coup,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Income => "income",
            Action::ForeignAid => "foreign aid",
            Action::Tax => "tax",
            Action::Exchange => "exchange",
            Action::Steal => "steal",
            Action::Assassinate => "assassinate",
            Action::Coup => "coup",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Income => {
                f.write_str("takes Income")
            }
            Action::ForeignAid => {
                f.write_str("gets foreign aid")
            }
            Action::Tax => {
                f.write_str("gets Taxes")
            }
            Action::Exchange => {
                f.write_str("exchanges with the court deck")
            }
            Action::Steal => {
                f.write_str("steals")
            }
            Action::Assassinate => {
                f.write_str("assassinates")
            }
            Action::Coup => {
                f.write_str("coups")
            }
        }
    }
}

impl FromStr for Action {
    type Err = CoupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        let action = match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "income" => Action::Income,
            "foreign aid" | "aid" => Action::ForeignAid,
            "tax" => Action::Tax,
            "exchange" => Action::Exchange,
            "steal" => Action::Steal,
            "assassinate" => Action::Assassinate,
            "coup" => Action::Coup,
            _ => return Err(CoupError::InvalidActionName(s.trim().to_string())),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use crate::action::Action;
    use crate::error::CoupError;

    #[test]
    fn parse_names() {
        assert_eq!("income".parse::<Action>().unwrap(), Action::Income);
        assert_eq!("Foreign Aid".parse::<Action>().unwrap(), Action::ForeignAid);
        assert_eq!("foreign_aid".parse::<Action>().unwrap(), Action::ForeignAid);
        assert_eq!("  foreign   aid ".parse::<Action>().unwrap(), Action::ForeignAid);
        assert_eq!("COUP".parse::<Action>().unwrap(), Action::Coup);

        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        match "swindle".parse::<Action>() {
            Err(CoupError::InvalidActionName(name)) => assert_eq!(name, "swindle"),
            other => panic!("expected invalid action name, got {:?}", other),
        }
        assert!("help".parse::<Action>().is_err());
    }
}
