use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RegistryOptions {
    pub store_path: PathBuf,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl RegistryOptions {
    pub fn set_store_path(mut self, store_path: PathBuf) -> Self {
        self.store_path = store_path;
        self
    }
}

impl Default for RegistryOptions {
    fn default() -> Self {
        // Defaults to $CWD/cadastro_pessoas.csv
        Self {
            store_path: PathBuf::from("cadastro_pessoas.csv"),
        }
    }
}
