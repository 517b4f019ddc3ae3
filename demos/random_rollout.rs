//! # Random Rollout Example
//!
//! Runs a uniformly random policy in the LetterWorld cross-product and, for
//! every real step, generates the counterfactual batch a learner would train on.
//!
//! # Usage
//! ```bash
//! cargo run --example random_rollout
//! RUST_LOG=debug cargo run --example random_rollout
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rmcross::{letter_world_crossproduct, LetterWorldConfig};
use tracing_subscriber::EnvFilter;

const EPISODES: u64 = 20;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging — set RUST_LOG=debug|info|warn
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("=== rmcross Random Rollout Example ===\n");

    let mut env = letter_world_crossproduct(LetterWorldConfig {
        switch_proba: 0.2,
        seed:         Some(0),
        ..Default::default()
    })?;
    let mut policy = StdRng::seed_from_u64(1);
    let n_actions = env.action_space().n;

    let mut best_return = f64::MIN;
    let mut best_trace = None;
    let mut real_steps = 0usize;
    let mut synthetic = 0usize;

    for episode in 0..EPISODES {
        env.reset(Some(episode));
        let mut episode_return = 0.0;

        loop {
            let action = policy.gen_range(0..n_actions);
            let step = env.step(action)?;
            episode_return += step.reward;
            real_steps += 1;

            if let Some((ground_obs, next_ground_obs)) = env.last_ground_transition() {
                synthetic += env
                    .generate_counterfactual_experience(ground_obs, action, next_ground_obs)
                    .len();
            }

            if step.terminated || step.truncated {
                break;
            }
        }

        println!(
            "episode {:>2}: {:>3} steps, final u = {}, return = {:.1}, status = {}",
            episode, env.steps(), env.machine_state(), episode_return, env.status()
        );
        if episode_return > best_return {
            best_return = episode_return;
            best_trace = Some(env.trace().clone());
        }
    }

    println!("\nreal transitions:           {}", real_steps);
    println!("counterfactual experiences: {}", synthetic);

    if let Some(trace) = best_trace {
        println!("\n╔══════════════════════╗");
        println!("║  BEST EPISODE TRACE  ║");
        println!("╚══════════════════════╝");
        let changes: Vec<_> = trace.entries().iter().filter(|e| e.from != e.to).collect();
        for e in changes {
            println!("  step {:>3}: {} --{}--> {} (r = {:.1})", e.step, e.from, e.symbol, e.to, e.reward);
        }
    }

    Ok(())
}
