use std::path::Path;

use base64::Engine as _;
use sha1::{Digest, Sha1};

use crate::{
    foundation::error::{ReelError, ReelResult},
    resolve::http,
    upload::{UploadReceipt, Uploader},
};

pub const B2_AUTHORIZE_URL: &str = "https://api.backblazeb2.com/b2api/v2/b2_authorize_account";
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Credentials of a B2 application key plus the target bucket.
#[derive(Clone, Debug)]
pub struct B2Credentials {
    pub key_id: String,
    pub key: String,
    pub bucket: String,
}

impl B2Credentials {
    pub fn validate(&self) -> ReelResult<()> {
        if self.key_id.trim().is_empty() || self.key.trim().is_empty() {
            return Err(ReelError::validation(
                "B2 credentials require an application key id and key",
            ));
        }
        if self.bucket.trim().is_empty() {
            return Err(ReelError::validation("B2 bucket name must be non-empty"));
        }
        Ok(())
    }

    /// `Authorization` header value for `b2_authorize_account`.
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.key_id, self.key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

/// Session returned by `b2_authorize_account`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2Session {
    pub account_id: String,
    pub authorization_token: String,
    pub api_url: String,
    pub download_url: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadTarget {
    upload_url: String,
    authorization_token: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    file_id: String,
    file_name: String,
    #[serde(default)]
    content_length: u64,
}

/// [`Uploader`] for the Backblaze B2 native API.
///
/// Flow: authorize, find the bucket (creating a private one when missing), get an
/// upload URL, then POST the file body.
pub struct B2Uploader {
    agent: ureq::Agent,
    creds: B2Credentials,
    authorize_url: String,
}

impl B2Uploader {
    pub fn new(creds: B2Credentials) -> ReelResult<Self> {
        creds.validate()?;
        Ok(Self {
            agent: http::agent(),
            creds,
            authorize_url: B2_AUTHORIZE_URL.to_string(),
        })
    }

    fn authorize(&self) -> ReelResult<B2Session> {
        let resp = self
            .agent
            .get(&self.authorize_url)
            .set("Authorization", &self.creds.basic_auth())
            .call()
            .map_err(|e| upload_error("b2_authorize_account", e))?;
        decode("b2_authorize_account", resp)
    }

    fn api_call(
        &self,
        session: &B2Session,
        op: &str,
        body: serde_json::Value,
    ) -> ReelResult<serde_json::Value> {
        let resp = self
            .agent
            .post(&format!("{}/b2api/v2/{op}", session.api_url))
            .set("Authorization", &session.authorization_token)
            .send_json(body)
            .map_err(|e| upload_error(op, e))?;
        decode(op, resp)
    }

    fn bucket_id(&self, session: &B2Session) -> ReelResult<String> {
        let listed = self.api_call(
            session,
            "b2_list_buckets",
            serde_json::json!({ "accountId": session.account_id, "bucketName": self.creds.bucket }),
        )?;
        if let Some(id) = find_bucket_id(&listed, &self.creds.bucket) {
            return Ok(id);
        }
        tracing::warn!(bucket = %self.creds.bucket, "bucket does not exist; creating it");
        let created = self.api_call(
            session,
            "b2_create_bucket",
            serde_json::json!({
                "accountId": session.account_id,
                "bucketName": self.creds.bucket,
                "bucketType": "allPrivate",
            }),
        )?;
        created
            .get("bucketId")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ReelError::upload("b2_create_bucket returned no bucketId"))
    }
}

fn upload_error(op: &str, err: ureq::Error) -> ReelError {
    ReelError::upload(http::classify(op, err).to_string())
}

fn decode<T: serde::de::DeserializeOwned>(op: &str, resp: ureq::Response) -> ReelResult<T> {
    resp.into_json()
        .map_err(|e| ReelError::upload(format!("{op}: invalid response: {e}")))
}

/// Id of `name` in a `b2_list_buckets` response.
fn find_bucket_id(listed: &serde_json::Value, name: &str) -> Option<String> {
    listed
        .get("buckets")?
        .as_array()?
        .iter()
        .find(|b| b.get("bucketName").and_then(|n| n.as_str()) == Some(name))?
        .get("bucketId")?
        .as_str()
        .map(str::to_string)
}

/// Public download URL of `file_name` in `bucket`.
pub fn download_url(session: &B2Session, bucket: &str, file_name: &str) -> String {
    format!(
        "{}/file/{}/{}",
        session.download_url,
        bucket,
        encode_file_name(file_name)
    )
}

/// Hex SHA-1 of the upload body, checked by B2 on receipt.
pub fn content_sha1(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Percent-encode a B2 file name, keeping `/` as the folder separator.
pub fn encode_file_name(name: &str) -> String {
    name.split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl Uploader for B2Uploader {
    #[tracing::instrument(skip(self, path), fields(bucket = %self.creds.bucket))]
    fn upload(&self, path: &Path, remote_name: &str) -> ReelResult<UploadReceipt> {
        if remote_name.trim().is_empty() {
            return Err(ReelError::validation("remote file name must be non-empty"));
        }
        let bytes = std::fs::read(path).map_err(|e| {
            ReelError::upload(format!("cannot read '{}': {e}", path.display()))
        })?;

        let session = self.authorize()?;
        let bucket_id = self.bucket_id(&session)?;
        let target: UploadTarget = serde_json::from_value(self.api_call(
            &session,
            "b2_get_upload_url",
            serde_json::json!({ "bucketId": bucket_id }),
        )?)
        .map_err(|e| ReelError::upload(format!("b2_get_upload_url: {e}")))?;

        tracing::info!(bytes = bytes.len(), remote_name, "uploading");
        let resp = self
            .agent
            .post(&target.upload_url)
            .set("Authorization", &target.authorization_token)
            .set("X-Bz-File-Name", &encode_file_name(remote_name))
            .set("Content-Type", VIDEO_CONTENT_TYPE)
            .set("X-Bz-Content-Sha1", &content_sha1(&bytes))
            .send_bytes(&bytes)
            .map_err(|e| upload_error("b2_upload_file", e))?;
        let uploaded: UploadedFile = decode("b2_upload_file", resp)?;

        let receipt = UploadReceipt {
            url: download_url(&session, &self.creds.bucket, &uploaded.file_name),
            file_id: uploaded.file_id,
            file_name: uploaded.file_name,
            size: if uploaded.content_length > 0 {
                uploaded.content_length
            } else {
                bytes.len() as u64
            },
        };
        tracing::info!(url = %receipt.url, "upload complete");
        Ok(receipt)
    }
}
