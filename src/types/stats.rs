use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_prs: u64,
    pub assignments_by_user: BTreeMap<String, u64>,
}
