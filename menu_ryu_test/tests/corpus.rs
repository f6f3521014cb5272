use libtest_mimic::{Arguments, Trial};

use menu_ryu_test::{corpora, fuzz};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Arguments::from_args();

    let mut trials = vec![];

    for corpus in corpora()? {
        trials.push(Trial::test(format!("corpus::{}", corpus.name), move || {
            let cases = corpus.check().map_err(|err| format!("{err:#}"))?;
            tracing::info!(corpus = corpus.name, cases, "passed");
            Ok(())
        }));
    }

    let fuzzers: [(&str, fn(u64, usize) -> anyhow::Result<()>, usize); 3] = [
        ("shortest_f64", fuzz::shortest_f64, 100_000),
        ("shortest_f32", fuzz::shortest_f32, 100_000),
        ("fixed_f64", fuzz::fixed_f64, 20_000),
    ];
    for (name, fuzzer, iterations) in fuzzers {
        trials.push(Trial::test(format!("fuzz::{name}"), move || {
            fuzzer(0x5eed, iterations).map_err(|err| format!("{err:#}"))?;
            Ok(())
        }));
    }

    libtest_mimic::run(&args, trials).exit();
}
