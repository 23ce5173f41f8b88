//! Integration tests for end-to-end Wisp execution.
//!
//! These tests verify the full pipeline:
//! Source → Tokens → AST → Vectorized execution → Field values

use wisp_tests::TestHarness;

/// The canonical wander scenario: per-sprite branch selection with exact
/// position deltas.
#[test]
fn wander_moves_each_sprite_by_its_branch() {
    let source = "\
@behavior wander:
    if speed > 5:
        pos.x += dir.x * speed * dt
    else:
        pos.x += dir.x * dt
";
    let mut harness = TestHarness::from_source(source)
        .field("pos.x", &[0.0, 0.0, 0.0])
        .field("dir.x", &[1.0, -1.0, 1.0])
        .field("speed", &[10.0, 2.0, 6.0])
        .constant("dt", 0.5);

    harness.run().unwrap();
    assert_eq!(harness.get("pos.x"), &[5.0, -0.5, 3.0]);
}

/// Every sprite is claimed by exactly one arm, first match wins, and
/// unmatched sprites without an else are untouched.
#[test]
fn if_chain_partitions_the_batch() {
    let source = "\
@behavior classify:
    if health > 75:
        state = 1
    elif health > 25:
        state = 2
    elif health > 0:
        state = 3
";
    let mut harness = TestHarness::from_source(source)
        .field("health", &[100.0, 80.0, 50.0, 10.0, 0.0])
        .field("state", &[9.0, 9.0, 9.0, 9.0, 9.0]);

    harness.run().unwrap();
    assert_eq!(harness.get("state"), &[1.0, 1.0, 2.0, 3.0, 9.0]);
}

/// Conditions are evaluated over the full entering mask; a later branch's
/// condition seeing values written by an earlier branch's body is the
/// documented claim-accounting behavior, not double execution.
#[test]
fn overlapping_conditions_never_run_two_arms() {
    let source = "\
@behavior overlap:
    if x > 0:
        hits += 1
    elif x > -100:
        hits += 1
    else:
        hits += 1
";
    let mut harness = TestHarness::from_source(source)
        .field("x", &[1.0, -1.0, -500.0])
        .field("hits", &[0.0, 0.0, 0.0]);

    harness.run().unwrap();
    // One increment each, no matter how many conditions held.
    assert_eq!(harness.get("hits"), &[1.0, 1.0, 1.0]);
}

#[test]
fn division_by_zero_saturates() {
    let source = "\
@behavior divzero:
    x /= 0
    y = 5 / 0
    z = x % 0
";
    let mut harness = TestHarness::from_source(source)
        .field("x", &[8.0, -2.0])
        .field("y", &[1.0, 1.0])
        .field("z", &[1.0, 1.0]);

    harness.run().unwrap();
    assert_eq!(harness.get("x"), &[8.0, -2.0]);
    assert_eq!(harness.get("y"), &[0.0, 0.0]);
    assert_eq!(harness.get("z"), &[0.0, 0.0]);
}

#[test]
fn unresolved_reference_aborts_the_frame() {
    let source = "\
@behavior broken:
    pos.x = pos.x + missing.field
";
    let mut harness = TestHarness::from_source(source).field("pos.x", &[1.0, 2.0]);

    let err = harness.run().unwrap_err();
    assert!(err.to_string().contains("missing.field"), "got: {err}");
    assert_eq!(harness.get("pos.x"), &[1.0, 2.0]);
}

/// A failed frame leaves the behavior usable: binding the missing constant
/// afterwards succeeds.
#[test]
fn failed_frames_can_be_retried() {
    let source = "\
@behavior drift:
    pos.x += dt
";
    let mut harness = TestHarness::from_source(source).field("pos.x", &[0.0]);

    assert!(harness.run().is_err());
    let mut harness = TestHarness::from_source(source)
        .field("pos.x", &[0.0])
        .constant("dt", 0.25);
    harness.run().unwrap();
    assert_eq!(harness.get("pos.x"), &[0.25]);
}

/// Statements observe earlier statements' writes within one frame.
#[test]
fn statements_run_in_order() {
    let source = "\
@behavior seq:
    x = 1
    y = x + 1
    x = y * 2
";
    let mut harness = TestHarness::from_source(source)
        .field("x", &[0.0])
        .field("y", &[0.0]);

    harness.run().unwrap();
    assert_eq!(harness.get("y"), &[2.0]);
    assert_eq!(harness.get("x"), &[4.0]);
}

/// Nested conditionals: the inner chain partitions only sprites already
/// claimed by the outer branch.
#[test]
fn nested_conditionals_compose_masks() {
    let source = "\
@behavior nest:
    if a > 0:
        if b > 0:
            out = 1
        else:
            out = 2
    else:
        out = 3
";
    let mut harness = TestHarness::from_source(source)
        .field("a", &[1.0, 1.0, -1.0, -1.0])
        .field("b", &[1.0, -1.0, 1.0, -1.0])
        .field("out", &[0.0, 0.0, 0.0, 0.0]);

    harness.run().unwrap();
    assert_eq!(harness.get("out"), &[1.0, 2.0, 3.0, 3.0]);
}

/// Running several frames accumulates like a real update loop.
#[test]
fn multiple_frames_accumulate() {
    let source = "\
@behavior fall:
    vel += 10 * dt
    pos.y += vel * dt
";
    let mut harness = TestHarness::from_source(source)
        .field("vel", &[0.0])
        .field("pos.y", &[0.0])
        .constant("dt", 0.5);

    harness.run_frames(3).unwrap();
    // vel: 5, 10, 15; pos.y: 2.5, 7.5, 15.0
    assert_eq!(harness.get("vel"), &[15.0]);
    assert_eq!(harness.get("pos.y"), &[15.0]);
}

/// Growing the batch between frames works because bindings are rebuilt on
/// every run.
#[test]
fn batch_growth_between_frames() {
    let source = "\
@behavior step:
    x += 1
";
    let mut harness = TestHarness::from_source(source).field("x", &[0.0, 0.0]);
    harness.run().unwrap();
    assert_eq!(harness.get("x"), &[1.0, 1.0]);

    harness.grow("x", &[100.0]);
    harness.run().unwrap();
    assert_eq!(harness.get("x"), &[2.0, 2.0, 101.0]);
}

/// Comparison and logical operators feed numeric results back into
/// arithmetic: true is exactly 1.0.
#[test]
fn boolean_encoding_is_numeric() {
    let source = "\
@behavior bools:
    hot = temp > 30
    score = hot * 10 + (not hot) * 2
";
    let mut harness = TestHarness::from_source(source)
        .field("temp", &[40.0, 20.0])
        .field("hot", &[0.0, 0.0])
        .field("score", &[0.0, 0.0]);

    harness.run().unwrap();
    assert_eq!(harness.get("hot"), &[1.0, 0.0]);
    assert_eq!(harness.get("score"), &[10.0, 2.0]);
}
