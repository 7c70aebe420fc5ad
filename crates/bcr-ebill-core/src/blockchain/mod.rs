use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

/// The operation a block in a bill's chain of custody records. The set is closed - a payload
/// with an unknown operation code doesn't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationCode {
    Issue,
    Accept,
    Decline,
    Endorse,
    RequestToAccept,
    RequestToPay,
    Sell,
}

impl OperationCode {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Issue,
            Self::Accept,
            Self::Decline,
            Self::Endorse,
            Self::RequestToAccept,
            Self::RequestToPay,
            Self::Sell,
        ]
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBlock {
    pub id: u64,
    pub operation_code: OperationCode,
    pub signature: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub previous_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainOfBlocks {
    pub blocks: Vec<ChainBlock>,
}

impl ChainOfBlocks {
    pub fn first_block(&self) -> Option<&ChainBlock> {
        self.blocks.first()
    }

    pub fn latest_block(&self) -> Option<&ChainBlock> {
        self.blocks.last()
    }

    pub fn block_with_operation_code_exists(&self, code: OperationCode) -> bool {
        self.blocks.iter().any(|b| b.operation_code == code)
    }

    /// The ledger guarantees exactly one Issue block, at the start of the chain. We don't
    /// enforce it, but we can check it.
    pub fn is_well_formed(&self) -> bool {
        let issue_blocks = self
            .blocks
            .iter()
            .filter(|b| b.operation_code == OperationCode::Issue)
            .count();
        issue_blocks == 1
            && self
                .first_block()
                .map(|b| b.operation_code == OperationCode::Issue)
                .unwrap_or(false)
    }

    /// Logs a warning if the chain doesn't hold up the ledger contract
    pub fn check_well_formed(&self, bill_name: &str) -> bool {
        let well_formed = self.is_well_formed();
        if !well_formed {
            warn!(
                "Chain of bill {bill_name} does not start with a single Issue block ({} blocks)",
                self.blocks.len()
            );
        }
        well_formed
    }
}
