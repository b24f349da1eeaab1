//! Patient / provider / claim relationship graph
//!
//! The graph view renders whatever [`RelationshipGraph`] holds. Graphs come
//! either from the graph feed or are derived from a claim collection with
//! [`RelationshipGraph::from_claims`]: each claim links its patient to its
//! provider, and suspicion propagates from a claim to both endpoints.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::claim::Claim;
use crate::privacy::{is_sensitive_field, mask_partial, mask_patient_id};

/// Characters left visible when a sensitive data value is masked
const VISIBLE_DATA_CHARS: usize = 4;

/// Kind of graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Patient,
    Provider,
    Claim,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub suspicious: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RelationshipGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes sharing an edge with `id`, in either direction
    pub fn neighbors(&self, id: &str) -> Vec<&GraphNode> {
        let linked: HashSet<&str> = self
            .edges
            .iter()
            .filter_map(|e| {
                if e.source == id {
                    Some(e.target.as_str())
                } else if e.target == id {
                    Some(e.source.as_str())
                } else {
                    None
                }
            })
            .collect();
        self.nodes
            .iter()
            .filter(|n| linked.contains(n.id.as_str()))
            .collect()
    }

    pub fn suspicious_nodes(&self) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.suspicious).collect()
    }

    /// Edge count per node id
    pub fn degrees(&self) -> HashMap<&str, usize> {
        let mut degrees: HashMap<&str, usize> =
            self.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
        for edge in &self.edges {
            *degrees.entry(edge.source.as_str()).or_default() += 1;
            *degrees.entry(edge.target.as_str()).or_default() += 1;
        }
        degrees
    }

    /// Edges whose endpoints are not both present as nodes
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Builds a patient → claim → provider graph
    ///
    /// A claim node is suspicious when the claim needs investigation; patient
    /// and provider nodes are suspicious when any linked claim is.
    pub fn from_claims(claims: &[Claim]) -> Self {
        let mut patients: BTreeMap<String, bool> = BTreeMap::new();
        let mut providers: BTreeMap<String, bool> = BTreeMap::new();
        let mut claim_nodes = Vec::with_capacity(claims.len());
        let mut edges = Vec::with_capacity(claims.len() * 2);

        for claim in claims {
            let suspicious = claim.needs_investigation();
            let patient = patients.entry(claim.patient_id.to_string()).or_default();
            *patient |= suspicious;
            let provider = providers.entry(claim.provider_id.to_string()).or_default();
            *provider |= suspicious;

            claim_nodes.push(GraphNode {
                id: claim.id.to_string(),
                label: claim.id.to_string(),
                node_type: NodeType::Claim,
                suspicious,
                data: Some(serde_json::json!({
                    "patient_id": claim.patient_id.as_str(),
                    "amount": claim.amount.to_string(),
                    "fraud_score": claim.fraud_score,
                    "status": claim.status.as_str(),
                })),
            });
            edges.push(GraphEdge {
                id: format!("{}-{}", claim.patient_id, claim.id),
                source: claim.patient_id.to_string(),
                target: claim.id.to_string(),
                label: Some("filed".to_string()),
            });
            edges.push(GraphEdge {
                id: format!("{}-{}", claim.id, claim.provider_id),
                source: claim.id.to_string(),
                target: claim.provider_id.to_string(),
                label: Some("billed".to_string()),
            });
        }

        let endpoint = |(id, suspicious): (String, bool), node_type| GraphNode {
            label: id.clone(),
            id,
            node_type,
            suspicious,
            data: None,
        };

        let mut nodes: Vec<GraphNode> = patients
            .into_iter()
            .map(|entry| endpoint(entry, NodeType::Patient))
            .collect();
        nodes.extend(providers.into_iter().map(|entry| endpoint(entry, NodeType::Provider)));
        nodes.extend(claim_nodes);

        Self { nodes, edges }
    }

    /// Copy safe for display: patient labels are masked, as are string
    /// values under sensitive keys in node data. Ids are kept so edges
    /// still resolve.
    pub fn redacted(mut self) -> Self {
        for node in &mut self.nodes {
            if node.node_type == NodeType::Patient {
                node.label = mask_patient_id(&node.label);
            }
            if let Some(serde_json::Value::Object(data)) = node.data.as_mut() {
                for (key, value) in data.iter_mut() {
                    if !is_sensitive_field(key) {
                        continue;
                    }
                    if let serde_json::Value::String(text) = value {
                        *text = mask_partial(text, VISIBLE_DATA_CHARS);
                    }
                }
            }
        }
        self
    }
}
