//! Verify command - run the extraction acceptance table.

use console::style;

use particulars_core::acceptance::run_cases;

pub fn run() -> anyhow::Result<()> {
    let outcomes = run_cases();

    for (i, outcome) in outcomes.iter().enumerate() {
        println!("Test {}: {}", i + 1, outcome.case.description);
        println!("  Input:    {:?}", outcome.case.input);
        println!("  Expected: {:?}", outcome.case.expected);
        println!("  Got:      {:?}", outcome.actual);

        let status = if outcome.passed {
            style("PASS").green()
        } else {
            style("FAIL").red()
        };
        println!("  Status:   {}", status);
        println!();
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        anyhow::bail!("{} of {} cases failed", failed, outcomes.len());
    }

    println!(
        "{} All {} cases passed",
        style("✓").green(),
        outcomes.len()
    );

    Ok(())
}
