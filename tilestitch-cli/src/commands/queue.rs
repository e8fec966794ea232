//! Queue commands - add, view and process queued jobs.

use tilestitch::job::JobId;
use tilestitch::queue::{process_queue, QueueEntry};
use tracing::warn;

use super::common::GlobalArgs;
use super::job::{print_assembly, print_fetch};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Add ids to the queue. Invalid ids are skipped with a warning.
pub fn add(args: &GlobalArgs, raw_ids: &[String]) -> Result<(), CliError> {
    let runner = CliRunner::new(args)?;
    runner.log_startup("add-queue");

    let (ids, rejected) = parse_ids(raw_ids);
    for entry in &rejected {
        warn!(entry = %entry, "Skipping invalid image id");
        println!("Skipping '{}': not a positive integer", entry);
    }

    let store = runner.queue();
    let added = runner.block_on(store.add(&ids))?;

    for id in &added {
        println!("Image {} added to the queue.", id);
    }
    let skipped = ids.len() - added.len();
    if skipped > 0 {
        println!("{} id(s) were already queued.", skipped);
    }
    Ok(())
}

/// Print the queue.
pub fn view(args: &GlobalArgs) -> Result<(), CliError> {
    let runner = CliRunner::without_logging(args)?;
    let entries = runner.block_on(runner.queue().view())?;
    print!("{}", format_queue(&entries));
    Ok(())
}

/// Run every queued job in order.
pub fn process(args: &GlobalArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args)?;
    runner.log_startup("process-queue");
    let pipeline = runner.pipeline()?;
    let store = runner.queue();

    let summary = runner.block_on(process_queue(&store, &pipeline))?;

    for (id, outcome) in &summary.completed {
        println!("Image {}:", id);
        print_fetch(&outcome.fetch);
        print_assembly(&outcome.assembly);
    }
    if summary.stopped_at_blank {
        println!("Stopped at a blank line in {}.", store.path().display());
    }
    println!("{} job(s) completed.", summary.completed.len());
    Ok(())
}

/// Splits arguments on commas and whitespace and parses each id.
///
/// Returns the valid ids in order and the rejected entries.
fn parse_ids(raw_ids: &[String]) -> (Vec<JobId>, Vec<String>) {
    let mut ids = Vec::new();
    let mut rejected = Vec::new();

    let tokens = raw_ids
        .iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty());

    for token in tokens {
        match token.parse::<JobId>() {
            Ok(id) => ids.push(id),
            Err(_) => rejected.push(token.to_string()),
        }
    }
    (ids, rejected)
}

fn format_queue(entries: &[QueueEntry]) -> String {
    if entries.is_empty() {
        return "The queue is empty.\n".to_string();
    }
    let mut out = String::from("--- Current Queue ---\n");
    for entry in entries {
        out.push_str(&format!("{}. {}\n", entry.ordinal, entry.value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_ids_splits_commas_and_spaces() {
        let (ids, rejected) = parse_ids(&strings(&["1,2", "3", " 4 , 5"]));
        let values: Vec<u64> = ids.iter().map(|id| id.get()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_parse_ids_rejects_invalid_entries() {
        let (ids, rejected) = parse_ids(&strings(&["7,abc,0,-3,,8"]));
        let values: Vec<u64> = ids.iter().map(|id| id.get()).collect();
        assert_eq!(values, vec![7, 8]);
        assert_eq!(rejected, strings(&["abc", "0", "-3"]));
    }

    #[test]
    fn test_format_empty_queue() {
        assert_eq!(format_queue(&[]), "The queue is empty.\n");
    }

    #[test]
    fn test_format_queue_numbers_entries() {
        let entries = vec![
            QueueEntry {
                ordinal: 1,
                value: "42".to_string(),
            },
            QueueEntry {
                ordinal: 2,
                value: "7".to_string(),
            },
        ];
        assert_eq!(
            format_queue(&entries),
            "--- Current Queue ---\n1. 42\n2. 7\n"
        );
    }
}
