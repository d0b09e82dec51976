use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::infrastructure::static_host;
use crate::infrastructure::static_host::StaticHost;

pub async fn start() -> Result<()> {
    let document_root = Config::document_root();
    if !document_root.join("index.html").exists() {
        tracing::warn!(
            document_root = %document_root.display(),
            "No index.html in document root, every request will 404"
        );
    }

    let host = StaticHost::new(document_root, &Config::get(ConfigKey::BasePath));
    return static_host::serve(host, &Config::get(ConfigKey::BindAddress), Config::port()?).await;
}
