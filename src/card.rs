use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::action::Action;
use crate::Card::{Ambassador, Assassin, Captain, Contessa, Duke, Inquisitor};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Duke,
    Ambassador,
    Inquisitor,
    Captain,
    Assassin,
    Contessa,
}

static STANDARD_VARIANTS: [Card; 5] = [
    Duke,
    Ambassador,
    Captain,
    Assassin,
    Contessa,
];

static INQUISITOR_VARIANTS: [Card; 5] = [
    Duke,
    Inquisitor,
    Captain,
    Assassin,
    Contessa,
];

impl Card {
    pub fn name(&self) -> &'static str {
        match self {
            Duke => "Duke",
            Ambassador => "Ambassador",
            Inquisitor => "Inquisitor",
            Captain => "Captain",
            Assassin => "Assassin",
            Contessa => "Contessa",
        }
    }

    /// The name with its indefinite article, e.g. "an Ambassador".
    pub fn with_article(&self) -> String {
        match self {
            Ambassador | Inquisitor | Assassin => format!("an {}", self.name()),
            _ => format!("a {}", self.name()),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of the two card configurations is in play. The variant swaps the Ambassador
/// for the Inquisitor; everything else is shared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSet {
    #[default]
    Standard,
    Inquisitor,
}

impl CardSet {
    pub fn cards(&self) -> &'static [Card] {
        match self {
            CardSet::Standard => &STANDARD_VARIANTS,
            CardSet::Inquisitor => &INQUISITOR_VARIANTS,
        }
    }

    /// The card that performs exchange (and doubles as a steal blocker).
    pub fn exchange_card(&self) -> Card {
        match self {
            CardSet::Standard => Ambassador,
            CardSet::Inquisitor => Inquisitor,
        }
    }
}

/// Which coin constant an action charges up front.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cost {
    Free,
    Assassinate,
    Coup,
}

/// One row of the action table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionRule {
    /// card the actor implicitly claims; `None` means anyone may take the action unchallenged
    pub enabler: Option<Card>,
    pub cost: Cost,
    pub blockers: &'static [Card],
    /// only the target may block, as opposed to every other player
    pub targeted: bool,
}

impl ActionRule {
    pub fn challengeable(&self) -> bool {
        self.enabler.is_some()
    }

    pub fn blockable(&self) -> bool {
        !self.blockers.is_empty()
    }
}

/// The action table. Every block and challenge the engine offers is derived from here.
pub fn rule(action: Action, set: CardSet) -> ActionRule {
    match action {
        Action::Income => ActionRule { enabler: None, cost: Cost::Free, blockers: &[], targeted: false },
        Action::ForeignAid => ActionRule { enabler: None, cost: Cost::Free, blockers: &[Duke], targeted: false },
        Action::Tax => ActionRule { enabler: Some(Duke), cost: Cost::Free, blockers: &[], targeted: false },
        Action::Exchange => ActionRule { enabler: Some(set.exchange_card()), cost: Cost::Free, blockers: &[], targeted: false },
        Action::Steal => ActionRule {
            enabler: Some(Captain),
            cost: Cost::Free,
            blockers: match set {
                CardSet::Standard => &[Ambassador, Captain],
                CardSet::Inquisitor => &[Inquisitor, Captain],
            },
            targeted: true,
        },
        Action::Assassinate => ActionRule { enabler: Some(Assassin), cost: Cost::Assassinate, blockers: &[Contessa], targeted: true },
        Action::Coup => ActionRule { enabler: None, cost: Cost::Coup, blockers: &[], targeted: true },
    }
}

/// Printable one-liner per card in the set, derived from the action table.
pub fn capability_summaries(set: CardSet) -> Vec<String> {
    set.cards()
        .iter()
        .map(|&card| {
            let performs: Vec<String> = Action::ALL
                .iter()
                .filter(|&&action| rule(action, set).enabler == Some(card))
                .map(|action| action.to_string())
                .collect();
            let blocks: Vec<String> = Action::ALL
                .iter()
                .filter(|&&action| rule(action, set).blockers.contains(&card))
                .map(|action| action.to_string())
                .collect();

            let mut line = card.name().to_string();
            if !performs.is_empty() {
                line.push_str(&format!(": {}", performs.join(", ")));
            }
            if !blocks.is_empty() {
                line.push_str(&format!("{} blocks {}", if performs.is_empty() { ":" } else { ";" }, blocks.join(", ")));
            }
            line
        })
        .collect()
}
