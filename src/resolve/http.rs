use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::foundation::error::{ReelError, ReelResult};

/// Connect/read/write timeout for remote API calls.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Shared blocking HTTP agent with bounded timeouts.
pub fn agent() -> ureq::Agent {
    let timeout = Duration::from_secs(HTTP_TIMEOUT_SECS);
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .build()
}

/// Map a ureq failure onto the error taxonomy: 404 is `NotFound`, everything else `Network`.
pub fn classify(what: &str, err: ureq::Error) -> ReelError {
    match err {
        ureq::Error::Status(404, _) => ReelError::not_found(format!("{what}: 404")),
        ureq::Error::Status(code, resp) => {
            let text = resp.into_string().unwrap_or_default();
            ReelError::network(format!("{what}: status {code}: {}", text.trim()))
        }
        ureq::Error::Transport(t) => ReelError::network(format!("{what}: {t}")),
    }
}

/// Decode a JSON response body.
pub fn read_json(what: &str, resp: ureq::Response) -> ReelResult<serde_json::Value> {
    resp.into_json()
        .map_err(|e| ReelError::network(format!("{what}: invalid JSON body: {e}")))
}

/// Read a whole response body into memory.
pub fn read_bytes(what: &str, resp: ureq::Response) -> ReelResult<Vec<u8>> {
    let mut bytes = Vec::new();
    resp.into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| ReelError::network(format!("{what}: read error: {e}")))?;
    if bytes.is_empty() {
        return Err(ReelError::not_found(format!("{what}: empty response body")));
    }
    Ok(bytes)
}

/// Write `bytes` to `dest` through a sibling temp file so readers never see a partial file.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> ReelResult<()> {
    use anyhow::Context as _;
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    let mut tmp = dest.as_os_str().to_os_string();
    tmp.push(".part");
    let tmp = std::path::PathBuf::from(tmp);
    std::fs::write(&tmp, bytes).with_context(|| format!("failed to write '{}'", tmp.display()))?;
    std::fs::rename(&tmp, dest)
        .with_context(|| format!("failed to move '{}' into place", dest.display()))?;
    Ok(())
}

/// GET `url` and store the body at `dest`.
pub fn download_to(agent: &ureq::Agent, url: &str, dest: &Path) -> ReelResult<()> {
    let resp = agent.get(url).call().map_err(|e| classify("download", e))?;
    let bytes = read_bytes("download", resp)?;
    write_atomic(dest, &bytes)?;
    tracing::debug!(url, dest = %dest.display(), bytes = bytes.len(), "downloaded");
    Ok(())
}
