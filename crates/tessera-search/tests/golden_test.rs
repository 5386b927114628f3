//! Golden cases: full-depth PC over the oracle of a canonical DAG.

use tessera_core::models::Node;
use tessera_core::{CancellationToken, Knowledge, TesseraConfig};
use tessera_graph::{is_legal_dag, Graph};
use tessera_search::{cpdag_to_dag, dag_to_cpdag, MSeparationTest, PcSearch};
use test_fixtures::{load_all, GoldenCpdagCase, GoldenKnowledgeCase};

fn graph_over(dag: &Graph, edges: &[String]) -> Graph {
    let names: Vec<&str> = dag.nodes().map(|n| n.name.as_str()).collect();
    let specs: Vec<&str> = edges.iter().map(String::as_str).collect();
    Graph::from_specs(&names, &specs).unwrap()
}

fn run_pc(dag: &Graph, knowledge: &Knowledge) -> tessera_search::SearchOutcome {
    let test = MSeparationTest::new(dag.clone(), 0.05).unwrap();
    PcSearch::new(TesseraConfig::default())
        .search(&test, knowledge, &CancellationToken::new())
        .unwrap()
}

#[test]
fn golden_cpdag_cases() {
    let cases: Vec<GoldenCpdagCase> = load_all("golden/cpdag");
    assert!(!cases.is_empty());
    for case in &cases {
        let dag: Graph = serde_json::from_value(case.dag.clone()).unwrap();
        let outcome = run_pc(&dag, &Knowledge::new());
        assert!(outcome.completed, "{}: search did not complete", case.name);

        let expected_skeleton = graph_over(&dag, &case.expected_skeleton);
        assert_eq!(outcome.graph.skeleton(), expected_skeleton, "{}: skeleton", case.name);

        for expected in &case.expected_sepsets {
            let (a, b) = (&expected.pair.0, &expected.pair.1);
            assert_eq!(
                outcome.sepsets.get(a, b),
                Some(expected.set.as_slice()),
                "{}: sepset({a}, {b})",
                case.name
            );
        }
        assert_eq!(outcome.sepsets.len(), case.expected_sepsets.len(), "{}", case.name);

        let expected_cpdag = graph_over(&dag, &case.expected_cpdag);
        assert_eq!(outcome.graph, expected_cpdag, "{}: pattern", case.name);
        assert_eq!(dag_to_cpdag(&dag).unwrap(), expected_cpdag, "{}: dag_to_cpdag", case.name);

        let extension = cpdag_to_dag(&expected_cpdag).unwrap();
        assert!(is_legal_dag(&extension), "{}: extension", case.name);
        assert_eq!(dag_to_cpdag(&extension).unwrap(), expected_cpdag, "{}: round trip", case.name);
    }
}

#[test]
fn golden_knowledge_cases() {
    let cases: Vec<GoldenKnowledgeCase> = load_all("golden/knowledge");
    assert!(!cases.is_empty());
    for case in &cases {
        let dag: Graph = serde_json::from_value(case.dag.clone()).unwrap();
        let knowledge = Knowledge::from_json(&case.knowledge.to_string()).unwrap();
        let outcome = run_pc(&dag, &knowledge);
        assert_eq!(
            outcome.graph,
            graph_over(&dag, &case.expected_pattern),
            "{}: pattern",
            case.name
        );
    }
}

#[test]
fn oracle_hides_latent_confounder() {
    // L confounds X and Y; X --> Z. The search only sees X, Y, Z.
    let dag: Graph = serde_json::from_str(
        r#"{
            "nodes": [{"name": "L", "node_type": "latent"}, {"name": "X"}, {"name": "Y"}, {"name": "Z"}],
            "edges": ["L --> X", "L --> Y", "X --> Z"]
        }"#,
    )
    .unwrap();
    let outcome = run_pc(&dag, &Knowledge::new());
    let names: Vec<&str> = outcome.graph.nodes().map(|n: &Node| n.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);
    assert_eq!(
        outcome.graph,
        Graph::from_specs(&["X", "Y", "Z"], &["X --- Y", "X --- Z"]).unwrap()
    );
}
