use clap::{Parser, Subcommand, ValueEnum};
use mathsuite::stats::{Distribution, Inequality};
use mathsuite::syntax::format_number;
use mathsuite::{algebra, eval_numeric, graph, parse_expression, stats};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a constant expression numerically
  Eval {
    /// The expression to evaluate, e.g. "2*(3+4)^2"
    #[arg(allow_hyphen_values = true)]
    expression: String,
  },
  /// Solve expression = 0 for x, reporting every real and complex root
  Solve {
    /// The polynomial expression, e.g. "(2x^4)+(2x)-1"
    #[arg(allow_hyphen_values = true)]
    expression: String,
  },
  /// Sample a function of x for line-plotting
  Graph {
    /// The function body, e.g. "x^2 - 3"
    #[arg(allow_hyphen_values = true)]
    expression: String,
    #[arg(long, default_value_t = graph::DOMAIN_MIN, allow_hyphen_values = true)]
    min: f64,
    #[arg(long, default_value_t = graph::DOMAIN_MAX, allow_hyphen_values = true)]
    max: f64,
    #[arg(long, default_value_t = graph::NUM_SAMPLES)]
    samples: usize,
  },
  /// Expand (a + b)^n symbolically
  Expand {
    a: String,
    b: String,
    n: u32,
  },
  /// Evaluate a discrete probability query and its pmf samples
  Dist {
    #[command(subcommand)]
    model: ModelCommand,
  },
}

#[derive(Subcommand)]
enum ModelCommand {
  /// Binomial distribution with a trial count and success probability
  Binomial {
    #[arg(long)]
    trials: u64,
    #[arg(long)]
    prob: f64,
    #[arg(long)]
    k: u64,
    #[arg(long, value_enum, default_value = "le")]
    query: QueryArg,
  },
  /// Poisson distribution with a rate
  Poisson {
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    k: u64,
    #[arg(long, value_enum, default_value = "le")]
    query: QueryArg,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum QueryArg {
  /// P(x ≤ k)
  Le,
  /// P(x ≥ k)
  Ge,
  /// P(x = k)
  Eq,
}

impl From<QueryArg> for Inequality {
  fn from(q: QueryArg) -> Self {
    match q {
      QueryArg::Le => Inequality::AtMost,
      QueryArg::Ge => Inequality::AtLeast,
      QueryArg::Eq => Inequality::Exactly,
    }
  }
}

fn main() {
  env_logger::init();
  let cli = Cli::parse();

  match cli.command {
    Commands::Eval { expression } => {
      match parse_expression(&expression).and_then(|e| eval_numeric(&e)) {
        Ok(value) => println!("{}", format_number(value)),
        Err(e) => eprintln!("Error: {}", e),
      }
    }
    Commands::Solve { expression } => {
      match algebra::solve_roots(&expression, "x") {
        Ok(solution) => print!("{}", solution.render()),
        Err(e) => eprintln!("Error: {}", e),
      }
    }
    Commands::Graph {
      expression,
      min,
      max,
      samples,
    } => match graph::sample_over(&expression, min, max, samples) {
      Ok(data) => {
        println!("# {}", data.label());
        for (x, y) in data.xs.iter().zip(&data.ys) {
          println!("{x}\t{y}");
        }
      }
      Err(e) => eprintln!("Error: {}", e),
    },
    // The two form-driven operations below stay quiet on failure; the
    // reason lands in the log instead of the output.
    Commands::Expand { a, b, n } => {
      match algebra::binomial_expansion(&a, &b, n) {
        Ok(expansion) => println!("{}", expansion.render()),
        Err(e) => log::warn!("expansion produced no output: {e}"),
      }
    }
    Commands::Dist { model } => {
      let (dist, k, query) = match model {
        ModelCommand::Binomial {
          trials,
          prob,
          k,
          query,
        } => (Distribution::Binomial { trials, p: prob }, k, query),
        ModelCommand::Poisson { rate, k, query } => {
          (Distribution::Poisson { rate }, k, query)
        }
      };
      let query = Inequality::from(query);
      match stats::evaluate(dist, query, k) {
        Ok(summary) => {
          println!("{}", summary.format_probability(query, k));
          for (x, p) in summary.support.iter().zip(&summary.pmf) {
            println!("{x}\t{p:.6}");
          }
        }
        Err(e) => log::warn!("distribution query produced no output: {e}"),
      }
    }
  }
}
