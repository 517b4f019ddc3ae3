use rmcross::{
    augment, CrossProduct, CrossProductBuilder, LetterLabeller, LetterWorld, RewardMachine,
    RewardMachineBuilder, ScriptedGround, Symbol,
};

fn env_with(machine: RewardMachine) -> CrossProduct {
    CrossProductBuilder::new()
        .ground(Box::new(LetterWorld::with_switch_proba(0.0)))
        .machine(machine)
        .labeller(Box::new(LetterLabeller))
        .build()
        .expect("builder should succeed")
}

fn letters_env() -> CrossProduct {
    env_with(RewardMachine::letter_world().unwrap())
}

// Ground transitions of LetterWorld that the labeller reads as each symbol
const TO_A:     ([i32; 3], usize, [i32; 3]) = ([0, 1, 2], 3, [0, 1, 1]);
const TO_B:     ([i32; 3], usize, [i32; 3]) = ([1, 1, 2], 3, [1, 1, 1]);
const TO_C:     ([i32; 3], usize, [i32; 3]) = ([0, 1, 4], 1, [0, 1, 5]);
const NO_EVENT: ([i32; 3], usize, [i32; 3]) = ([0, 1, 3], 2, [0, 2, 3]);

#[test]
fn test_no_event_yields_self_loop_for_every_state() {
    let env = letters_env();
    let (g, a, g_next) = NO_EVENT;
    let batch = env.generate_counterfactual_experience(&g, a, &g_next);

    assert_eq!(batch.len(), env.machine().states().len());
    for (e, &u_i) in batch.iter().zip(env.machine().states()) {
        assert_eq!(e.obs, augment(&g, u_i));
        assert_eq!(e.next_obs, augment(&g_next, u_i), "u_j must equal u_i on no event");
        assert_eq!(e.action, a);
        assert_eq!(e.reward, 0.0);
        assert!(!e.done);
        assert!(e.info.is_empty());
    }
}

#[test]
fn test_c_from_every_state() {
    let env = letters_env();
    let (g, a, g_next) = TO_C;
    let batch = env.generate_counterfactual_experience(&g, a, &g_next);

    let next_states: Vec<i32> = batch.iter().map(|e| *e.next_obs.last().unwrap()).collect();
    let rewards: Vec<f64> = batch.iter().map(|e| e.reward).collect();
    let done: Vec<bool> = batch.iter().map(|e| e.done).collect();

    assert_eq!(next_states, vec![0, 2, 2, 4]);
    assert_eq!(rewards, vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(done, vec![false, false, false, true]);
}

#[test]
fn test_batch_follows_state_order() {
    let env = letters_env();
    let (g, a, g_next) = TO_A;
    let batch = env.generate_counterfactual_experience(&g, a, &g_next);

    let from: Vec<i32> = batch.iter().map(|e| *e.obs.last().unwrap()).collect();
    assert_eq!(from, vec![0, 1, 2, 3]);
    let to: Vec<i32> = batch.iter().map(|e| *e.next_obs.last().unwrap()).collect();
    assert_eq!(to, vec![1, 1, 3, 3]);
}

#[test]
fn test_undefined_rows_are_skipped_not_defaulted() {
    let machine = RewardMachineBuilder::new()
        .states([0, 1, 2, 3])
        .initial(0)
        .terminal([4])
        .alphabet(Symbol::letter_alphabet())
        .transition(1, Symbol::c(), 2, 0.0)
        .transition(3, Symbol::c(), 4, 1.0)
        .transition(0, Symbol::a(), 1, 0.0)
        .build_partial()
        .unwrap();
    let env = env_with(machine);

    let (g, a, g_next) = TO_C;
    let batch = env.generate_counterfactual_experience(&g, a, &g_next);
    assert_eq!(batch.len(), 2, "only states 1 and 3 define C");
    assert_eq!(batch[0].obs, augment(&g, 1));
    assert_eq!(batch[0].next_obs, augment(&g_next, 2));
    assert_eq!(batch[1].obs, augment(&g, 3));
    assert_eq!(batch[1].next_obs, augment(&g_next, 4));
    assert!(batch[1].done);

    let (g, a, g_next) = NO_EVENT;
    assert!(env.generate_counterfactual_experience(&g, a, &g_next).is_empty());
}

#[test]
fn test_batch_never_exceeds_state_count() {
    let env = letters_env();
    for (g, a, g_next) in [TO_A, TO_B, TO_C, NO_EVENT] {
        let batch = env.generate_counterfactual_experience(&g, a, &g_next);
        assert!(batch.len() <= env.machine().states().len());
    }
}

#[test]
fn test_generation_leaves_episode_untouched() {
    let mut env = CrossProductBuilder::new()
        .ground(Box::new(ScriptedGround::new(vec![vec![0, 1, 2], vec![0, 1, 1]])))
        .machine(RewardMachine::letter_world().unwrap())
        .labeller(Box::new(LetterLabeller))
        .build()
        .unwrap();
    env.reset(None);
    let step = env.step(3).unwrap();
    assert_eq!(env.machine_state(), 1);

    let (g, g_next) = env.last_ground_transition().map(|(p, n)| (p.to_vec(), n.to_vec())).unwrap();
    let batch = env.generate_counterfactual_experience(&g, 3, &g_next);

    assert_eq!(env.machine_state(), 1);
    assert_eq!(env.steps(), 1);
    assert_eq!(env.trace().len(), 1);
    assert!(batch.iter().any(|e| e.next_obs == step.obs), "the real transition is part of the batch");
}
