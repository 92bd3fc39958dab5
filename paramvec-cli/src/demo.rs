//! Built-in demo strategies, registered so the CLI has something to sample.

use paramvec_core::{
    vector, ArgSpec, BooleanGen, EnumGen, EnumType, FloatGen, GenError, IntegerGen, ParamSet,
    SampleCount, SequenceGen, StringGen, StringLength, Value, WeightedIntegerGen,
};
use paramvec_runner::{StrategyOutput, StrategyRegistry};

pub fn registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();

    registry
        .register_nullary("addition", addition)
        .describe("two bounded integers with hand-picked boundary cases");
    registry
        .register_nullary("ordered_range", ordered_range)
        .describe("a (lo, hi) float window with lo < hi");
    registry
        .register_nullary("ports", ports)
        .describe("TCP ports biased towards the unprivileged range");
    registry
        .register_nullary("priorities", priorities)
        .describe("weighted enum priorities paired with a retry flag");
    registry
        .register_nullary("grid", grid)
        .describe("batch sizes and encodings, enumerable with nsamples=auto");
    registry
        .register_nullary("usernames", usernames)
        .describe("validated usernames with regression test vectors");
    registry
        .register("squares", squares)
        .describe("precomputed (n, n^2) tuples");

    registry
}

fn addition() -> Result<ParamSet, GenError> {
    ParamSet::new(vec![
        ArgSpec::random("a", IntegerGen::new(-1000, 1000)?),
        ArgSpec::random("b", IntegerGen::new(-1000, 1000)?),
    ])?
    .with_directed_vector("zeros", vector![0, 0])?
    .with_directed_vector("max_pair", vector![1000, 1000])?
    .with_directed_vector("min_pair", vector![-1000, -1000])?
    .with_test_vector("issue_17", vector![17, -17])
}

fn ordered_range() -> Result<ParamSet, GenError> {
    Ok(ParamSet::new(vec![
        ArgSpec::random("lo", FloatGen::new(0.0, 100.0)?),
        ArgSpec::random("hi", FloatGen::new(0.0, 100.0)?),
    ])?
    .with_named_constraint("lo_below_hi", |v| v[0] < v[1]))
}

fn ports() -> Result<ParamSet, GenError> {
    ParamSet::new(vec![
        ArgSpec::random(
            "port",
            WeightedIntegerGen::new([(1, 1023, 0.1), (1024, 49151, 0.6), (49152, 65535, 0.3)])?,
        ),
        ArgSpec::fixed("host", "127.0.0.1"),
    ])?
    .with_directed_vector("lowest", vector![1, "127.0.0.1"])?
    .with_directed_vector("highest", vector![65535, "127.0.0.1"])
}

fn priorities() -> Result<ParamSet, GenError> {
    let priority = EnumType::new("Priority", ["LOW", "MEDIUM", "HIGH", "CRITICAL"])?;
    let critical = priority.member("CRITICAL")?;
    let weights = [("LOW", 0.4), ("MEDIUM", 0.3), ("HIGH", 0.2), ("CRITICAL", 0.1)];
    ParamSet::new(vec![
        ArgSpec::random("priority", EnumGen::weighted(priority, weights)?),
        ArgSpec::random("retry", BooleanGen::new(0.25)),
    ])?
    .with_directed_vector("critical_no_retry", vector![critical, false])
}

fn grid() -> Result<ParamSet, GenError> {
    ParamSet::new(vec![
        ArgSpec::random("batch_size", SequenceGen::new([1, 8, 64, 512])?),
        ArgSpec::random("encoding", SequenceGen::new(["utf8", "latin1"])?),
        ArgSpec::random("compress", BooleanGen::default()),
    ])
}

fn usernames() -> Result<ParamSet, GenError> {
    let name = ArgSpec::builder("username")
        .description("lowercase login name")
        .generator(StringGen::new(StringLength::between(3, 12)?, "abcdefghijklmnopqrstuvwxyz")?)
        .validator(|v| v.as_str().is_some_and(|s| (3..=12).contains(&s.len())))
        .test_values(["root", "a1b2c3"])
        .build()?;
    let age = ArgSpec::builder("age")
        .generator(IntegerGen::new(13, 120)?)
        .directed_values([13, 120])
        .build()?;
    ParamSet::new(vec![name, age])?
        .with_test_vector("root_user", vector!["root", 0])?
        .with_test_vector("long_name", vector!["abcdefghijkl", 99])
}

fn squares(count: SampleCount) -> Result<StrategyOutput, GenError> {
    let n = match count {
        SampleCount::Count(n) => n as i64,
        SampleCount::Auto => 10,
    };
    let samples = (0..n).map(|i| vector![i, i * i]).collect();
    Ok(StrategyOutput::legacy(["n", "square"], samples))
}

/// Display form of a value, truncated for the table view.
pub(crate) fn cell(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 24 {
        let head: String = text.chars().take(21).collect();
        format!("{head}...")
    } else {
        text
    }
}
