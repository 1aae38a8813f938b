//! Unify two terms given on the command line and print the result

use unidag::{Algorithm, TermGraph, TermPair, UnificationResult};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <term1> <term2> [algorithm]", args[0]);
        eprintln!();
        eprintln!("Terms use the syntax f(X,a): uppercase-led names are variables,");
        eprintln!("other names are constants or functions.");
        eprintln!();
        eprintln!("Algorithms:");
        for algorithm in Algorithm::ALL {
            eprintln!("  {}", algorithm.name());
        }
        eprintln!("(default: paterson-wegman)");
        std::process::exit(1);
    }

    let algorithm = match args.get(3) {
        Some(name) => match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => Algorithm::PatersonWegman,
    };

    let mut graph = TermGraph::new();
    let pair = match TermPair::parse(&args[1], &args[2], &mut graph) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    println!(
        "Unifying {} with {} using {}",
        graph.display(pair.left),
        graph.display(pair.right),
        algorithm
    );

    match algorithm.find_unifier(&mut graph, &pair) {
        UnificationResult::Unifiable(sigma) => {
            println!("Unifier: {}", sigma.display(&graph));
            let instance = sigma.apply(pair.left, &mut graph);
            println!("Unified term: {}", graph.display(instance));
        }
        UnificationResult::NotUnifiable => {
            println!("Not unifiable");
            std::process::exit(2);
        }
    }
}
