//! CLI command definitions and dispatch.
//!
//! Each subcommand maps to one `IndexAdmin` operation. Success messages go
//! to stdout with exit code 0, failure messages to stderr with exit code 1;
//! every outcome is exactly one line.

use clap::Subcommand;
use search_admin_client::{IndexAdmin, OpError};

/// Administrative subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an index
    IndexCreate {
        /// The index name
        index_name: String,
    },
    /// Create an index from a mapping file, or update its mapping if it exists
    IndexCreateOrUpdateMapping {
        /// The index name
        index_name: String,
        /// The path where the mapping file is located
        mapping_file_path: String,
    },
    /// Delete an index
    IndexDelete {
        /// The index name
        index_name: String,
    },
    /// Check whether an index exists
    IndexExists {
        /// The index name
        index_name: String,
    },
    /// Point an alias at an index
    AliasCreate {
        /// The index name
        index_name: String,
        /// The alias name
        alias_name: String,
    },
    /// Remove an index from an alias
    AliasRemoveIndex {
        /// The index name
        index_name: String,
        /// The alias name
        alias_name: String,
    },
    /// Switch an alias from one index to another
    AliasSwitchIndex {
        /// The new index name
        new_index_name: String,
        /// The old index name
        old_index_name: String,
        /// The alias name
        alias_name: String,
    },
}

/// Execute a subcommand against the resolved connection and report the
/// outcome. Returns the process exit code.
pub async fn run(command: Commands, admin: &IndexAdmin) -> i32 {
    let outcome = match &command {
        Commands::IndexCreate { index_name } => admin.create_index(index_name).await,
        Commands::IndexCreateOrUpdateMapping {
            index_name,
            mapping_file_path,
        } => {
            admin
                .create_or_update_mapping(index_name, mapping_file_path)
                .await
        }
        Commands::IndexDelete { index_name } => admin.delete_index(index_name).await,
        Commands::IndexExists { index_name } => admin.index_exists(index_name).await,
        Commands::AliasCreate {
            index_name,
            alias_name,
        } => admin.create_alias(index_name, alias_name).await,
        Commands::AliasRemoveIndex {
            index_name,
            alias_name,
        } => admin.remove_alias(index_name, alias_name).await,
        Commands::AliasSwitchIndex {
            new_index_name,
            old_index_name,
            alias_name,
        } => {
            admin
                .switch_alias(new_index_name, old_index_name, alias_name)
                .await
        }
    };

    report(outcome)
}

/// Map an operation outcome to its single output line and exit code.
fn report(outcome: Result<String, OpError>) -> i32 {
    match outcome {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use search_admin_client::{ClientError, SearchEngineClient};
    use serde_json::Value;
    use std::sync::Arc;

    struct StubClient {
        exists: bool,
    }

    #[async_trait]
    impl SearchEngineClient for StubClient {
        async fn index_exists(&self, _index: &str) -> Result<bool, ClientError> {
            Ok(self.exists)
        }

        async fn create_index(&self, _index: &str, _body: Option<&Value>) -> Result<(), ClientError> {
            Ok(())
        }

        async fn put_mapping(&self, _index: &str, _body: &Value) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_index(&self, _index: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn put_alias(&self, _index: &str, _alias: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_alias(&self, _index: &str, _alias: &str) -> Result<(), ClientError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_success_maps_to_exit_zero() {
        let admin = IndexAdmin::new(Arc::new(StubClient { exists: false }));
        let command = Commands::IndexCreate {
            index_name: "products".to_string(),
        };

        assert_eq!(run(command, &admin).await, 0);
    }

    #[tokio::test]
    async fn test_precondition_failure_maps_to_exit_one() {
        let admin = IndexAdmin::new(Arc::new(StubClient { exists: true }));
        let command = Commands::IndexCreate {
            index_name: "products".to_string(),
        };

        assert_eq!(run(command, &admin).await, 1);
    }

    #[tokio::test]
    async fn test_invalid_argument_maps_to_exit_one() {
        let admin = IndexAdmin::new(Arc::new(StubClient { exists: false }));
        let command = Commands::AliasCreate {
            index_name: "".to_string(),
            alias_name: "live".to_string(),
        };

        assert_eq!(run(command, &admin).await, 1);
    }

    #[tokio::test]
    async fn test_exists_reports_success_for_both_states() {
        for exists in [true, false] {
            let admin = IndexAdmin::new(Arc::new(StubClient { exists }));
            let command = Commands::IndexExists {
                index_name: "products".to_string(),
            };

            assert_eq!(run(command, &admin).await, 0);
        }
    }
}
