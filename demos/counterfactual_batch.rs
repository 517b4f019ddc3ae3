//! # Counterfactual Batch Example
//!
//! Shows the experiences synthesized from a single ground transition, first
//! with the total LetterWorld machine and then with a partial machine whose
//! gaps are skipped.
//!
//! # Usage
//! ```bash
//! cargo run --example counterfactual_batch
//! ```

use rmcross::{
    CrossProductBuilder, Experience, LetterLabeller, LetterWorld, RewardMachine,
    RewardMachineBuilder, Symbol,
};

fn print_batch(title: &str, batch: &[Experience]) {
    println!("\n── {} ({} experiences) ──", title, batch.len());
    for e in batch {
        println!(
            "  {:?} --a{}--> {:?}  r = {:.1}  done = {}",
            e.obs, e.action, e.next_obs, e.reward, e.done
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== rmcross Counterfactual Batch Example ===");

    let machine = RewardMachine::letter_world()?;
    println!("\nLetterWorld machine as JSON:\n{}", serde_json::to_string_pretty(&machine)?);

    let env = CrossProductBuilder::new()
        .ground(Box::new(LetterWorld::with_switch_proba(0.0)))
        .machine(machine)
        .labeller(Box::new(LetterLabeller))
        .build()?;

    // Step right onto the C square: (1,4) -> (1,5)
    let (g, a, g_next) = (vec![0, 1, 4], 1, vec![0, 1, 5]);
    print_batch("symbol C, total machine", &env.generate_counterfactual_experience(&g, a, &g_next));

    // Wander in the empty middle of the grid
    let (g, a, g_next) = (vec![0, 1, 3], 2, vec![0, 2, 3]);
    print_batch("no event, total machine", &env.generate_counterfactual_experience(&g, a, &g_next));

    // A machine that only reacts to C from states 1 and 3
    let partial = RewardMachineBuilder::new()
        .states([0, 1, 2, 3])
        .initial(0)
        .terminal([4])
        .alphabet(Symbol::letter_alphabet())
        .transition(1, Symbol::c(), 2, 0.0)
        .transition(3, Symbol::c(), 4, 1.0)
        .build_partial()?;

    let env = CrossProductBuilder::new()
        .ground(Box::new(LetterWorld::with_switch_proba(0.0)))
        .machine(partial)
        .labeller(Box::new(LetterLabeller))
        .build()?;

    let (g, a, g_next) = (vec![0, 1, 4], 1, vec![0, 1, 5]);
    print_batch("symbol C, partial machine", &env.generate_counterfactual_experience(&g, a, &g_next));

    Ok(())
}
