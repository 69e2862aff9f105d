use colored::Colorize;
use std::path::PathBuf;

/// Something the user should hear about while components are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A file was written. `path` is relative to the working directory.
    FileAdded { path: PathBuf },
    /// The component's output directory already existed, nothing was touched.
    ComponentSkipped {
        component: String,
        output_dir: PathBuf,
    },
    /// Generation failed while processing `component`; the batch is being rolled back.
    BatchFailed { component: String },
}

pub trait Reporter {
    fn notify(&mut self, notification: Notification);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;
impl Reporter for ConsoleReporter {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::FileAdded { path } => {
                println!("{} {}", "create".green(), path.display());
            }
            Notification::ComponentSkipped { output_dir, .. } => {
                println!(
                    "{} {} already exists, skipping.",
                    "warning".yellow(),
                    output_dir.display()
                );
            }
            Notification::BatchFailed { component } => {
                eprintln!(
                    "{} generating '{}' failed, rolling back.",
                    "error".red(),
                    component
                );
            }
        }
    }
}

/// Collects notifications in order.
impl Reporter for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
