//! Backup subcommands.

use clap::Subcommand;

use crate::cli::output::{print_detail, print_section, print_success};
use crate::service::ServiceResult;
use crate::store::{BookStore, JsonStore};

#[derive(Debug, Subcommand)]
pub enum BackupCommands {
    /// Snapshot the current book
    Create {
        /// Short note folded into the backup's file name
        #[arg(long)]
        note: Option<String>,
    },
    /// List available backups, newest first
    List,
    /// Replace the current book with a backup
    Restore {
        /// Backup file name as printed by `backup list`
        #[arg(long)]
        name: String,
    },
}

pub fn handle_backup(store: &JsonStore, command: BackupCommands) -> ServiceResult<()> {
    match command {
        BackupCommands::Create { note } => {
            let book = store.load()?;
            store.backup(&book, note.as_deref())?;
            print_success("Backup created");
            Ok(())
        }
        BackupCommands::List => {
            print_section("Backups");
            let backups = store.list_backups()?;
            if backups.is_empty() {
                print_detail("No backups yet.");
            }
            for name in backups {
                print_detail(&name);
            }
            Ok(())
        }
        BackupCommands::Restore { name } => {
            let book = store.restore(&name)?;
            print_success(&format!(
                "Restored book with {} expense(s)",
                book.expense_count()
            ));
            Ok(())
        }
    }
}
