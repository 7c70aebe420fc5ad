pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LEDGER_URL: &str = "http://localhost:8000";

// identity
pub const IDENTITY_PATH: &str = "/identity/return";
pub const PEER_ID_PATH: &str = "/identity/peer_id/return";
pub const IDENTITY_CREATE_PATH: &str = "/identity/create";
pub const IDENTITY_CHANGE_PATH: &str = "/identity/change";

// contacts
pub const CONTACTS_PATH: &str = "/contacts/return";
pub const CONTACT_NEW_PATH: &str = "/contacts/new";
pub const CONTACT_EDIT_PATH: &str = "/contacts/edit";
pub const CONTACT_REMOVE_PATH: &str = "/contacts/remove";

// bills
pub const BILLS_PATH: &str = "/bills/return";
pub const BILL_PATH_PREFIX: &str = "/bill/return/";
pub const BILL_CHAIN_PATH_PREFIX: &str = "/bill/chain/return/";
pub const BILL_ISSUE_PATH: &str = "/bill/issue";
pub const BILL_ACCEPT_PATH: &str = "/bill/accept";
pub const BILL_ENDORSE_PATH: &str = "/bill/endorse";
pub const BILL_SELL_PATH: &str = "/bill/sell";
pub const BILL_REQUEST_TO_ACCEPT_PATH: &str = "/bill/request_to_accept";
pub const BILL_REQUEST_TO_PAY_PATH: &str = "/bill/request_to_pay";

pub const OP_CODES_PATH: &str = "/opcodes/return";
