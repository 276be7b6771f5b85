use pacte_clipboard::SystemClipboard;
use pacte_core::Config;
use pacte_history::HistoryStore;
use pacte_ops::Context;
use pacte_store::LocalFs;
use std::path::Path;

/// Everything a command needs, resolved once per invocation.
pub struct Runtime {
    pub config: Config,
    pub history: HistoryStore,
    pub clipboard: SystemClipboard,
}

impl Runtime {
    /// Discover config from `cwd` upward and open the per-user history.
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config = Config::discover(cwd)?;
        let root = pacte_store::store_root();
        tracing::debug!(root = %root.display(), "using store root");
        let history = HistoryStore::from_config(root, &config)?;
        Ok(Self {
            config,
            history,
            clipboard: SystemClipboard::detect(),
        })
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            fs: &LocalFs,
            clipboard: &self.clipboard,
            history: &self.history,
            config: &self.config,
        }
    }
}
