use async_trait::async_trait;
use bcr_ebill_core::{
    PeerId, ServiceTraitBounds,
    bill::{Bill, IssueBillForm},
    blockchain::{ChainOfBlocks, OperationCode},
    contact::Contact,
    identity::{Identity, IdentityForm},
};
use log::{debug, warn};
use reqwest::{RequestBuilder, Response, multipart};
use serde::{Deserialize, de::DeserializeOwned};

use super::{Error, Result};
use crate::{Config, constants::*};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Deserialize)]
struct PeerIdResponse {
    id: PeerId,
}

/// The HTTP API of the ledger. All authority over identities, contacts and bills lives behind it.
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LedgerApi: ServiceTraitBounds {
    /// Returns the local identity - with empty fields, if none was created yet
    async fn get_identity(&self) -> Result<Identity>;

    /// Returns the peer id of the local node
    async fn get_peer_id(&self) -> Result<PeerId>;

    async fn create_identity(&self, identity: &IdentityForm) -> Result<()>;

    async fn change_identity(&self, identity: &IdentityForm) -> Result<()>;

    async fn get_contacts(&self) -> Result<Vec<Contact>>;

    async fn new_contact(&self, name: &str, peer_id: &PeerId) -> Result<()>;

    async fn edit_contact(&self, old_name: &str, name: &str, peer_id: &PeerId) -> Result<()>;

    async fn remove_contact(&self, name: &str) -> Result<()>;

    async fn get_bills(&self) -> Result<Vec<Bill>>;

    async fn get_bill(&self, name: &str) -> Result<Bill>;

    /// Returns the chain of custody of the bill with the given name
    async fn get_bill_chain(&self, name: &str) -> Result<ChainOfBlocks>;

    async fn get_op_codes(&self) -> Result<Vec<OperationCode>>;

    async fn issue_bill(&self, form: &IssueBillForm) -> Result<()>;

    async fn accept_bill(&self, bill_name: &str) -> Result<()>;

    async fn endorse_bill(&self, bill_name: &str, endorsee: &str) -> Result<()>;

    async fn sell_bill(&self, bill_name: &str, buyer: &str, amount_numbers: u64) -> Result<()>;

    async fn request_to_accept_bill(&self, bill_name: &str) -> Result<()>;

    async fn request_to_pay_bill(&self, bill_name: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct LedgerClient {
    cl: reqwest::Client,
    base_url: url::Url,
    api_token: Option<String>,
}

impl ServiceTraitBounds for LedgerClient {}

#[cfg(test)]
impl ServiceTraitBounds for MockLedgerApi {}

impl LedgerClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder =
            builder.timeout(std::time::Duration::from_secs(cfg.request_timeout_secs));
        Ok(Self {
            cl: builder.build()?,
            base_url: cfg.ledger_base_url.clone(),
            api_token: cfg.api_token.clone(),
        })
    }

    /// Appends the given path to the base URL. A trailing name is percent-encoded as a single
    /// path segment.
    fn endpoint(&self, path: &str, name: Option<&str>) -> Result<url::Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(name) = name {
                segments.push(name);
            }
        }
        Ok(url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.api_token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, name: Option<&str>) -> Result<T> {
        let url = self.endpoint(path, name)?;
        debug!("GET {url}");
        let res = self.authorized(self.cl.get(url)).send().await?;
        let body = check_status(res)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_form(&self, path: &str, fields: Vec<(&'static str, String)>) -> Result<()> {
        let url = self.endpoint(path, None)?;
        debug!("POST {url}");
        let form = fields
            .into_iter()
            .fold(multipart::Form::new(), |form, (key, value)| {
                form.text(key, value)
            });
        let res = self
            .authorized(self.cl.post(url))
            .multipart(form)
            .send()
            .await?;
        check_status(res)?;
        Ok(())
    }
}

fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let path = res.url().path().to_owned();
    warn!("Ledger returned {status} for {path}");
    Err(Error::Status {
        status: status.as_u16(),
        path,
    })
}

fn identity_fields(identity: &IdentityForm) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("name", identity.name.clone()),
        ("date_of_birth", identity.date_of_birth.clone()),
        ("city_of_birth", identity.city_of_birth.clone()),
        ("country_of_birth", identity.country_of_birth.clone()),
        ("email", identity.email.clone()),
        ("postal_address", identity.postal_address.clone()),
    ];
    if let Some(ref company) = identity.company {
        fields.push(("company", company.clone()));
    }
    if let Some(ref phone_number) = identity.phone_number {
        fields.push(("phone_number", phone_number.clone()));
    }
    fields
}

fn issue_fields(form: &IssueBillForm) -> Vec<(&'static str, String)> {
    vec![
        ("maturity_date", form.maturity_date.clone()),
        ("payee_name", form.payee_name.clone()),
        ("drawer_is_payee", form.drawer_is_payee.to_string()),
        ("currency_code", form.currency_code.clone()),
        ("amount_numbers", form.amount_numbers.to_string()),
        ("drawee_name", form.drawee_name.clone()),
        ("drawer_is_drawee", form.drawer_is_drawee.to_string()),
        ("drawer_name", form.drawer_name.clone()),
        ("place_of_drawing", form.place_of_drawing.clone()),
        ("place_of_payment", form.place_of_payment.clone()),
        ("bill_jurisdiction", form.bill_jurisdiction.clone()),
        ("language", form.language.clone()),
        ("date_of_issue", form.date_of_issue.clone()),
    ]
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LedgerApi for LedgerClient {
    async fn get_identity(&self) -> Result<Identity> {
        self.get_json(IDENTITY_PATH, None).await
    }

    async fn get_peer_id(&self) -> Result<PeerId> {
        let res: PeerIdResponse = self.get_json(PEER_ID_PATH, None).await?;
        Ok(res.id)
    }

    async fn create_identity(&self, identity: &IdentityForm) -> Result<()> {
        self.post_form(IDENTITY_CREATE_PATH, identity_fields(identity))
            .await
    }

    async fn change_identity(&self, identity: &IdentityForm) -> Result<()> {
        self.post_form(IDENTITY_CHANGE_PATH, identity_fields(identity))
            .await
    }

    async fn get_contacts(&self) -> Result<Vec<Contact>> {
        self.get_json(CONTACTS_PATH, None).await
    }

    async fn new_contact(&self, name: &str, peer_id: &PeerId) -> Result<()> {
        self.post_form(
            CONTACT_NEW_PATH,
            vec![("name", name.to_owned()), ("peer_id", peer_id.to_string())],
        )
        .await
    }

    async fn edit_contact(&self, old_name: &str, name: &str, peer_id: &PeerId) -> Result<()> {
        self.post_form(
            CONTACT_EDIT_PATH,
            vec![
                ("old_name", old_name.to_owned()),
                ("name", name.to_owned()),
                ("peer_id", peer_id.to_string()),
            ],
        )
        .await
    }

    async fn remove_contact(&self, name: &str) -> Result<()> {
        self.post_form(CONTACT_REMOVE_PATH, vec![("name", name.to_owned())])
            .await
    }

    async fn get_bills(&self) -> Result<Vec<Bill>> {
        self.get_json(BILLS_PATH, None).await
    }

    async fn get_bill(&self, name: &str) -> Result<Bill> {
        self.get_json(BILL_PATH_PREFIX, Some(name)).await
    }

    async fn get_bill_chain(&self, name: &str) -> Result<ChainOfBlocks> {
        self.get_json(BILL_CHAIN_PATH_PREFIX, Some(name)).await
    }

    async fn get_op_codes(&self) -> Result<Vec<OperationCode>> {
        self.get_json(OP_CODES_PATH, None).await
    }

    async fn issue_bill(&self, form: &IssueBillForm) -> Result<()> {
        self.post_form(BILL_ISSUE_PATH, issue_fields(form)).await
    }

    async fn accept_bill(&self, bill_name: &str) -> Result<()> {
        self.post_form(BILL_ACCEPT_PATH, vec![("bill_name", bill_name.to_owned())])
            .await
    }

    async fn endorse_bill(&self, bill_name: &str, endorsee: &str) -> Result<()> {
        self.post_form(
            BILL_ENDORSE_PATH,
            vec![
                ("bill_name", bill_name.to_owned()),
                ("endorsee", endorsee.to_owned()),
            ],
        )
        .await
    }

    async fn sell_bill(&self, bill_name: &str, buyer: &str, amount_numbers: u64) -> Result<()> {
        self.post_form(
            BILL_SELL_PATH,
            vec![
                ("bill_name", bill_name.to_owned()),
                ("buyer", buyer.to_owned()),
                ("amount_numbers", amount_numbers.to_string()),
            ],
        )
        .await
    }

    async fn request_to_accept_bill(&self, bill_name: &str) -> Result<()> {
        self.post_form(
            BILL_REQUEST_TO_ACCEPT_PATH,
            vec![("bill_name", bill_name.to_owned())],
        )
        .await
    }

    async fn request_to_pay_bill(&self, bill_name: &str) -> Result<()> {
        self.post_form(
            BILL_REQUEST_TO_PAY_PATH,
            vec![("bill_name", bill_name.to_owned())],
        )
        .await
    }
}
