/// One renderable node; `id` must be unique across the data set.
#[derive(Clone, Debug, Default)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub color: Option<String>,
	pub group: Option<u32>,
	/// Relative visual weight; mapped to the drawn radius.
	pub size: Option<f64>,
}

/// A directed edge between two node ids.
#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

/// What the canvas consumes. Links whose endpoints are missing from
/// `nodes` are ignored.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
