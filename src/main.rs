/*!
 * Page Memory Simulator - Main Entry Point
 *
 * Interactive simulation of page allocation to named programs.
 * The first argument selects the placement policy: anything starting with
 * `w`/`W` chooses worst-fit, otherwise best-fit.
 */

use pagemem::{init_tracing, PageAllocator, PagememError, PoolConfig, Shell};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();
    run()?;
    Ok(())
}

fn run() -> Result<(), PagememError> {
    let policy_arg = std::env::args().nth(1);
    let config = PoolConfig::from_env()?.with_policy_arg(policy_arg.as_deref());
    info!(
        policy = %config.policy,
        capacity_pages = config.capacity_pages,
        units_per_page = config.units_per_page,
        "Starting page memory simulator"
    );

    let allocator = PageAllocator::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(allocator, &config, stdin.lock(), stdout.lock());
    shell.run()?;

    info!("Session finished");
    Ok(())
}
