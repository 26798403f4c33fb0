use std::path::PathBuf;

use clap::Parser;
use mr::average::average_rating;
use mr::coordinator::Coordinator;
use mr::group::{group_by_product, merge_groups, Group};
use mr::rating::Rating;
use mr::worker::{load_json, save_result, Worker};

/// Computes the average rating of every product.
#[derive(Parser, Debug)]
#[command(name = "average")]
struct Args {
    /// JSON input file, repeat for several
    #[arg(short, long = "input", required = true)]
    inputs: Vec<PathBuf>,

    /// Inputs hold `[product, [ratings] | null]` groups instead of flat rating arrays
    #[arg(long)]
    grouped: bool,

    #[arg(short, long, default_value = "./final/averages.json")]
    output: PathBuf,

    /// Number of reduce tasks, between 1 and 4096
    #[arg(short, long, default_value_t = 4)]
    n_reduce: i32,

    /// Also write every reduce task's output into this directory
    #[arg(long)]
    task_output_dir: Option<PathBuf>,
}

fn load_groups(args: &Args) -> anyhow::Result<Vec<Group<i32, Rating>>> {
    if args.grouped {
        let mut groups = vec![];
        for path in &args.inputs {
            groups.extend(load_json::<Vec<Group<i32, Rating>>>(path)?);
        }
        return Ok(merge_groups(groups));
    }

    let mut ratings = vec![];
    for path in &args.inputs {
        ratings.extend(load_json::<Vec<Rating>>(path)?);
    }
    log::info!("loaded {} ratings", ratings.len());
    Ok(group_by_product(ratings))
}

async fn run(args: &Args) -> anyhow::Result<Vec<(i32, f64)>> {
    let groups = load_groups(args)?;
    let tasks = Coordinator::new(groups, args.n_reduce)?.into_tasks();

    let mut worker = Worker::new(0, average_rating::<Rating>);
    if let Some(dir) = &args.task_output_dir {
        worker = worker.with_output_dir(dir.clone());
    }
    log::info!("{} started", worker);

    let mut averages = worker.run(tasks).await?;
    averages.sort_by_key(|(k, _)| *k);
    save_result(&averages, &args.output)?;
    log::info!(
        "wrote {} averages to {}",
        averages.len(),
        args.output.display()
    );
    Ok(averages)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_module("mr", log::LevelFilter::Info)
        .filter_module("average", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    run(&args).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["average", "-i", "a.json", "-i", "b.json"]).unwrap();

        assert_eq!(args.inputs, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert!(!args.grouped);
        assert_eq!(args.output, PathBuf::from("./final/averages.json"));
        assert_eq!(args.n_reduce, 4);
        assert!(args.task_output_dir.is_none());
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["average"]).is_err());
    }

    #[tokio::test]
    async fn test_run_flat_ratings() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ratings.json");
        std::fs::write(
            &input,
            r#"[
                {"user": 1, "product": 3, "rating": 2.0},
                {"user": 2, "product": 3, "rating": 4.0},
                {"user": 3, "product": 3, "rating": 3.0},
                {"user": 1, "product": 1, "rating": 1.0},
                {"user": 2, "product": 1, "rating": 2.0}
            ]"#,
        )
        .unwrap();
        let output = dir.path().join("out/averages.json");
        let args = Args::try_parse_from([
            "average",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-n",
            "2",
        ])
        .unwrap();

        let averages = run(&args).await.unwrap();

        assert_eq!(averages, vec![(1, 1.5), (3, 3.0)]);
        let saved: Vec<(i32, f64)> = load_json(&output).unwrap();
        assert_eq!(saved, averages);
    }

    #[tokio::test]
    async fn test_run_grouped_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("groups.json");
        std::fs::write(
            &input,
            r#"[[7, null], [9, [{"user": 1, "product": 9, "rating": 5.0}]], [2, []]]"#,
        )
        .unwrap();
        let args = Args::try_parse_from([
            "average",
            "--grouped",
            "-i",
            input.to_str().unwrap(),
            "-o",
            dir.path().join("averages.json").to_str().unwrap(),
        ])
        .unwrap();

        let averages = run(&args).await.unwrap();

        assert_eq!(averages, vec![(2, 0.0), (7, 0.0), (9, 5.0)]);
    }

    #[tokio::test]
    async fn test_run_rejects_zero_reduce() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ratings.json");
        std::fs::write(&input, "[]").unwrap();
        let args = Args::try_parse_from([
            "average",
            "-i",
            input.to_str().unwrap(),
            "-n",
            "0",
        ])
        .unwrap();

        assert!(run(&args).await.is_err());
    }

    #[tokio::test]
    async fn test_run_rejects_huge_reduce() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ratings.json");
        std::fs::write(&input, "[]").unwrap();
        let args = Args::try_parse_from([
            "average",
            "-i",
            input.to_str().unwrap(),
            "-o",
            dir.path().join("averages.json").to_str().unwrap(),
            "-n",
            "2000000000",
        ])
        .unwrap();

        assert!(run(&args).await.is_err());
        assert!(!dir.path().join("averages.json").exists());
    }
}
