//! End-to-end tests exercising every unification strategy on the same cases

use unidag::{Algorithm, Substitution, TermGraph, TermPair};

fn unify_with(algorithm: Algorithm, s1: &str, s2: &str) -> (TermGraph, Option<Substitution>) {
    let mut g = TermGraph::new();
    let pair = TermPair::parse(s1, s2, &mut g).unwrap();
    let result = algorithm.find_unifier(&mut g, &pair);
    (g, result.into_unifier())
}

/// Asserts that `algorithm` unifies the pair and that the unifier binds each
/// listed variable to the expected rendered term
fn assert_unifies(algorithm: Algorithm, s1: &str, s2: &str, expected: &[(&str, &str)]) {
    let (g, sigma) = unify_with(algorithm, s1, s2);
    let sigma = match sigma {
        Some(sigma) => sigma,
        None => panic!("{}: expected {} ~ {} to unify", algorithm, s1, s2),
    };
    assert_eq!(
        sigma.len(),
        expected.len(),
        "{}: unexpected domain {} for {} ~ {}",
        algorithm,
        sigma.display(&g),
        s1,
        s2
    );
    for &(variable, term) in expected {
        let bound = sigma
            .get(variable)
            .unwrap_or_else(|| panic!("{}: {} unbound in {} ~ {}", algorithm, variable, s1, s2));
        assert_eq!(
            g.display(bound).to_string(),
            term,
            "{}: wrong binding for {} in {} ~ {}",
            algorithm,
            variable,
            s1,
            s2
        );
    }
}

fn assert_not_unifiable(algorithm: Algorithm, s1: &str, s2: &str) {
    let (_, sigma) = unify_with(algorithm, s1, s2);
    assert!(
        sigma.is_none(),
        "{}: expected {} ~ {} to fail",
        algorithm,
        s1,
        s2
    );
}

#[test]
fn ground_bindings_match_across_strategies() {
    for algorithm in Algorithm::ALL {
        assert_unifies(algorithm, "f(X,a)", "f(b,Y)", &[("X", "b"), ("Y", "a")]);
        assert_unifies(algorithm, "X", "f(a,g(b))", &[("X", "f(a,g(b))")]);
        assert_unifies(algorithm, "f(X,g(X))", "f(a,Y)", &[("X", "a"), ("Y", "g(a)")]);
        assert_unifies(
            algorithm,
            "h(X,Y,Z)",
            "h(a,f(X),g(Y))",
            &[("X", "a"), ("Y", "f(a)"), ("Z", "g(f(a))")],
        );
    }
}

#[test]
fn chained_variables_resolve_to_ground() {
    for algorithm in Algorithm::ALL {
        assert_unifies(algorithm, "f(X,Y)", "f(Y,a)", &[("X", "a"), ("Y", "a")]);
        assert_unifies(
            algorithm,
            "f(X,Y,Z)",
            "f(Y,Z,b)",
            &[("X", "b"), ("Y", "b"), ("Z", "b")],
        );
    }
}

#[test]
fn identical_terms_unify_with_empty_unifier() {
    for algorithm in Algorithm::ALL {
        for term in ["X", "a", "f(X,g(a,Y))"] {
            let (_, sigma) = unify_with(algorithm, term, term);
            let sigma = sigma.unwrap();
            assert!(
                sigma.is_empty(),
                "{}: {} ~ {} gave {:?} bindings",
                algorithm,
                term,
                term,
                sigma.len()
            );
        }
    }
}

#[test]
fn occurs_check_rejects_cyclic_problems() {
    for algorithm in Algorithm::ALL {
        assert_not_unifiable(algorithm, "X", "f(X)");
        assert_not_unifiable(algorithm, "X", "f(g(h(X)))");
        assert_not_unifiable(algorithm, "g(X,Y)", "g(f(Y),f(X))");
    }
}

#[test]
fn clashes_are_rejected() {
    for algorithm in Algorithm::ALL {
        assert_not_unifiable(algorithm, "a", "b");
        assert_not_unifiable(algorithm, "f(a)", "g(a)");
        assert_not_unifiable(algorithm, "f(a)", "f(a,b)");
        assert_not_unifiable(algorithm, "f(a)", "a");
        assert_not_unifiable(algorithm, "f(X,X)", "f(a,b)");
        assert_not_unifiable(algorithm, "f(c,c)", "f(c,g(c))");
    }
}

#[test]
fn unifiers_equate_both_sides() {
    let cases = [
        ("f(X,Y)", "f(Y,X)"),
        ("f(g(X),Y)", "f(Y,g(a))"),
        ("h(X,f(X),Y)", "h(g(Z),f(g(Z)),Z)"),
        ("f(g(X,X),g(Y,Y))", "f(Y,Z)"),
    ];
    for algorithm in Algorithm::ALL {
        for (s1, s2) in cases {
            let mut g = TermGraph::new();
            let pair = TermPair::parse(s1, s2, &mut g).unwrap();
            let sigma = algorithm
                .find_unifier(&mut g, &pair)
                .into_unifier()
                .unwrap_or_else(|| panic!("{}: {} ~ {}", algorithm, s1, s2));
            let left = sigma.apply(pair.left, &mut g);
            let right = sigma.apply(pair.right, &mut g);
            assert!(
                g.eq_terms(left, right),
                "{}: {} applied to {} ~ {} gives {} vs {}",
                algorithm,
                sigma.display(&g),
                s1,
                s2,
                g.display(left),
                g.display(right)
            );
        }
    }
}

#[test]
fn unifiers_are_idempotent() {
    let cases = [("f(X,Y)", "f(Y,a)"), ("h(X,f(X),Y)", "h(g(Z),f(g(Z)),Z)")];
    for algorithm in Algorithm::ALL {
        for (s1, s2) in cases {
            let mut g = TermGraph::new();
            let pair = TermPair::parse(s1, s2, &mut g).unwrap();
            let sigma = algorithm
                .find_unifier(&mut g, &pair)
                .into_unifier()
                .unwrap();
            for (_, bound) in sigma.iter().collect::<Vec<_>>() {
                let again = sigma.apply(bound, &mut g);
                assert!(
                    g.eq_terms(bound, again),
                    "{}: range of {} not fixed under itself",
                    algorithm,
                    sigma.display(&g)
                );
            }
        }
    }
}

#[test]
fn input_terms_survive_unification() {
    // every strategy must leave the caller's pair readable afterwards
    for algorithm in Algorithm::ALL {
        let mut g = TermGraph::new();
        let pair = TermPair::parse("f(X,g(a))", "f(g(Y),X)", &mut g).unwrap();
        let _ = algorithm.find_unifier(&mut g, &pair);
        assert_eq!(g.display(pair.left).to_string(), "f(X,g(a))");
        assert_eq!(g.display(pair.right).to_string(), "f(g(Y),X)");
    }
}

#[test]
fn deep_sharing_stays_tractable() {
    // f(X1,...,Xn) ~ f(g(X0,X0),...,g(X{n-1},X{n-1})) has an exponential
    // tree unifier but a linear DAG one
    let n = 24;
    let left: Vec<String> = (1..=n).map(|i| format!("X{}", i)).collect();
    let right: Vec<String> = (0..n).map(|i| format!("g(X{0},X{0})", i)).collect();
    let s1 = format!("f({})", left.join(","));
    let s2 = format!("f({})", right.join(","));

    for algorithm in [Algorithm::PolynomialRobinson, Algorithm::PatersonWegman] {
        let (g, sigma) = unify_with(algorithm, &s1, &s2);
        let sigma = sigma.unwrap_or_else(|| panic!("{}: family of size {}", algorithm, n));
        assert_eq!(sigma.len(), n);
        assert_eq!(
            g.display(sigma.get("X1").unwrap()).to_string(),
            "g(X0,X0)"
        );
    }
}

#[test]
fn strategy_selection_by_name() {
    let mut g = TermGraph::new();
    let pair = TermPair::parse("f(X)", "f(a)", &mut g).unwrap();
    let algorithm: Algorithm = "robinson-poly".parse().unwrap();
    let sigma = algorithm.find_unifier(&mut g, &pair).into_unifier().unwrap();
    assert_eq!(g.display(sigma.get("X").unwrap()).to_string(), "a");
}
