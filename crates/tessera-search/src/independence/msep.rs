//! d-separation oracle: independence read off a known DAG.

use tessera_core::errors::{GraphError, IndependenceError, TesseraResult};
use tessera_core::models::Node;
use tessera_core::traits::{IndependenceResult, IndependenceTest};
use tessera_graph::{is_d_separated, is_legal_dag, Graph, NodeId};

/// Oracle test over a DAG. Only measured nodes are exposed as variables;
/// latent nodes still shape which paths are open.
#[derive(Debug, Clone)]
pub struct MSeparationTest {
    dag: Graph,
    variables: Vec<Node>,
    alpha: f64,
}

impl MSeparationTest {
    /// Fails if `dag` has an undirected edge or a directed cycle.
    pub fn new(dag: Graph, alpha: f64) -> Result<Self, GraphError> {
        if !is_legal_dag(&dag) {
            return Err(GraphError::NotADag {
                reason: "the m-separation oracle needs a directed acyclic graph".to_string(),
            });
        }
        let variables = dag.nodes().filter(|n| n.is_measured()).cloned().collect();
        Ok(Self {
            dag,
            variables,
            alpha,
        })
    }

    pub fn dag(&self) -> &Graph {
        &self.dag
    }

    fn id(&self, node: &Node) -> Result<NodeId, IndependenceError> {
        self.dag
            .node_id(&node.name)
            .ok_or_else(|| IndependenceError::UnknownVariable {
                name: node.name.clone(),
            })
    }
}

impl IndependenceTest for MSeparationTest {
    fn variables(&self) -> &[Node] {
        &self.variables
    }

    fn check_independence(&self, x: &Node, y: &Node, z: &[Node]) -> TesseraResult<IndependenceResult> {
        let xi = self.id(x)?;
        let yi = self.id(y)?;
        let zi = z.iter().map(|n| self.id(n)).collect::<Result<Vec<_>, _>>()?;
        let separated = is_d_separated(&self.dag, xi, yi, &zi);
        Ok(IndependenceResult {
            independent: separated,
            p_value: if separated { 1.0 } else { 0.0 },
        })
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn name(&self) -> &str {
        "m_separation"
    }
}
