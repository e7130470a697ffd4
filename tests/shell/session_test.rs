/*!
 * Shell Session Tests
 * Scripted menu sessions against an in-memory allocator
 */

use pagemem::memory::{PageAllocator, PlacementPolicy};
use pagemem::{PoolConfig, Shell};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn run_session(config: &PoolConfig, script: &str) -> (PageAllocator, String) {
    let allocator = PageAllocator::from_config(config).unwrap();
    let mut shell = Shell::new(allocator, config, Cursor::new(script.to_string()), Vec::new());
    shell.run().unwrap();
    let (allocator, output) = shell.into_parts();
    (allocator, String::from_utf8(output).unwrap())
}

#[test]
fn test_banner_and_menu() {
    let (_, out) = run_session(&PoolConfig::default(), "5\n");
    assert!(out.starts_with(
        "Using best fit algorithm\n\n1. Add program\n2. Kill program\n3. Fragmentation\n4. Print Memory\n5. Exit\n\n"
    ));
    assert!(out.ends_with("choice - \n\n"));
}

#[test]
fn test_worst_fit_banner() {
    let config = PoolConfig::default().with_policy_arg(Some("w"));
    let (allocator, out) = run_session(&config, "5\n");
    assert!(out.starts_with("Using worst fit algorithm\n\n"));
    assert_eq!(allocator.policy(), PlacementPolicy::WorstFit);
}

#[test]
fn test_add_kill_and_fragmentation() {
    let script = "1\nA\n32\n1\nB\n16\n1\nC\n100\n2\nA\n3\n2\nZ\n5\n";
    let (allocator, out) = run_session(&PoolConfig::default(), script);

    assert!(out.contains("Program size (KB) - Program A added successfully, 8 page(s) used.\n\n"));
    assert!(out.contains("Program B added successfully, 4 page(s) used."));
    assert!(out.contains("Error, not enough memory for Program C\n\n"));
    assert!(out.contains("Program A successfully killed, 8 page(s) reclaimed."));
    assert!(out.contains("There are 2 fragment(s)."));
    assert!(out.contains("Program Z could not be found in memory"));
    assert_eq!(allocator.fragment_count(), 2);
}

#[test]
fn test_duplicate_and_invalid_sizes() {
    let script = "1 A 8\n1 A 8\n1 B 0\n1 C -4\n1 D lots\n5\n";
    let (allocator, out) = run_session(&PoolConfig::default(), script);

    assert!(out.contains("Error, Program A is already running."));
    assert!(out.contains("Error, invalid size for Program B"));
    assert!(out.contains("Error, invalid size for Program C"));
    assert!(out.contains("Error, invalid size for Program D"));
    assert_eq!(allocator.stats().used_pages, 2);
}

#[test]
fn test_print_memory_grid() {
    let config = PoolConfig::default().with_capacity(16);
    let (_, out) = run_session(&config, "1\nA\n12\n1\nBB\n4\n4\n5\n");

    let expected = concat!(
        "    A    A    A   BB Free Free Free Free\n",
        " Free Free Free Free Free Free Free Free\n",
        "\n\n"
    );
    assert!(out.contains(expected), "map output was:\n{out}");
}

#[test]
fn test_invalid_choice_continues() {
    let (_, out) = run_session(&PoolConfig::default(), "9\nhello\n3\n5\n");
    assert_eq!(out.matches("Invalid choice").count(), 2);
    assert!(out.contains("There are 1 fragment(s)."));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let (allocator, out) = run_session(&PoolConfig::default(), "1\nA\n");
    assert!(out.ends_with("Program name - Program size (KB) - \n\n"));
    assert_eq!(allocator.block_count(), 1);
}

#[test]
fn test_custom_unit_label_in_prompt() {
    let mut config = PoolConfig::default();
    config.unit_label = "MB".to_string();
    let (_, out) = run_session(&config, "1 A 4\n5\n");
    assert!(out.contains("Program size (MB) - "));
}
