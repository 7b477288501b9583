//! プロファイル一覧（ビルトイン + profiles.json）

use std::sync::Arc;

use common::domain::HomeDir;
use common::error::Error;
use common::llm::{list_available_profiles, load_profiles_config};
use common::ports::outbound::FileSystem;

use crate::ports::outbound::ProfileLister;

pub struct StdProfileLister {
    fs: Arc<dyn FileSystem>,
    home: HomeDir,
}

impl StdProfileLister {
    pub fn new(fs: Arc<dyn FileSystem>, home: HomeDir) -> Self {
        Self { fs, home }
    }
}

impl ProfileLister for StdProfileLister {
    fn list_profiles(&self) -> Result<(Vec<String>, Option<String>), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), &self.home)?;
        Ok(list_available_profiles(cfg.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;

    #[test]
    fn test_list_without_profiles_json_is_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let lister = StdProfileLister::new(Arc::new(StdFileSystem), HomeDir::new(dir.path()));
        let (names, default) = lister.list_profiles().unwrap();
        assert!(names.contains(&"azure".to_string()));
        assert!(names.contains(&"echo".to_string()));
        assert_eq!(default.as_deref(), Some("azure"));
    }

    #[test]
    fn test_list_merges_profiles_json() {
        let dir = tempfile::tempdir().unwrap();
        let home = HomeDir::new(dir.path());
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(
            home.profiles_config_path(),
            r#"{"default_provider": "local", "providers": {"local": {"type": "echo"}}}"#,
        )
        .unwrap();
        let lister = StdProfileLister::new(Arc::new(StdFileSystem), home);
        let (names, default) = lister.list_profiles().unwrap();
        assert!(names.contains(&"local".to_string()));
        assert_eq!(default.as_deref(), Some("local"));
    }
}
