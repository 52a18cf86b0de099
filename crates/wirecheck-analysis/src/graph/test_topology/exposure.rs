//! Exposure analysis: candidate selection, propagation, classification.

use std::collections::VecDeque;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use wirecheck_core::config::AnalysisConfig;
use wirecheck_core::types::collections::{FxHashMap, FxHashSet, Occurrences, SmallVec2};

use super::frameworks::TestFramework;
use super::types::{
    AnalysisFailure, AnalyzedTestFunction, AnalyzedTestModule, ExposureStatus, ExposureSummary,
    FlaggedTest, IndirectExposure,
};
use crate::parsers::DeclarationTree;
use crate::resolver::Symbol;

/// Position of a candidate: `(module index, test index)`.
type CandidateRef = (usize, usize);

/// Candidate reference graph. Edge weights are the caller's occurrence
/// offsets.
type ExposureGraph = DiGraph<CandidateRef, Occurrences>;

pub struct ExposureAnalyzer {
    framework: TestFramework,
}

impl ExposureAnalyzer {
    pub fn new(framework: TestFramework) -> Self {
        Self { framework }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(TestFramework::from_config(config))
    }

    pub fn framework(&self) -> &TestFramework {
        &self.framework
    }

    /// Analyze every test module in `modules`.
    ///
    /// Fills each module's `tests` with its candidates and their exposures,
    /// then classifies the arity-zero ones. Running it twice over the same
    /// modules gives the same result.
    pub fn analyze(&self, modules: &mut [AnalyzedTestModule]) -> ExposureSummary {
        let mut summary = ExposureSummary::default();

        for module in modules.iter_mut() {
            module.tests.clear();
            if !module.is_test_file {
                continue;
            }
            match (&module.declaration_tree, &module.failure) {
                (Some(tree), _) => module.tests = self.select_candidates(&module.key, tree),
                (None, Some(error)) => summary.analysis_failures.push(AnalysisFailure::new(module, error)),
                (None, None) => {}
            }
        }

        let graph = build_graph(modules);
        for (target, exposure) in propagate(&graph, modules) {
            let (m, t) = graph[target];
            modules[m].tests[t].indirect_exposures.push(exposure);
        }

        for module in modules.iter() {
            for test in &module.tests {
                summary.total_test_count += 1;
                match test.status() {
                    Some(ExposureStatus::Hidden) => summary
                        .hidden
                        .push(FlaggedTest::new(module, test, ExposureStatus::Hidden)),
                    Some(ExposureStatus::OverExposed) => summary
                        .over_exposed
                        .push(FlaggedTest::new(module, test, ExposureStatus::OverExposed)),
                    Some(ExposureStatus::Clean) | None => {}
                }
            }
        }

        tracing::info!(
            candidates = summary.total_test_count,
            hidden = summary.hidden.len(),
            over_exposed = summary.over_exposed.len(),
            failures = summary.analysis_failures.len(),
            "exposure analysis complete"
        );
        summary
    }

    fn select_candidates(&self, key: &str, tree: &DeclarationTree) -> Vec<AnalyzedTestFunction> {
        tree.functions()
            .filter_map(|function| {
                let kind = self.framework.classify(function, tree);
                kind.is_candidate().then(|| AnalyzedTestFunction {
                    owner_module_key: key.to_string(),
                    module_name: tree.module_name().to_string(),
                    function: function.clone(),
                    is_directly_exposed: tree.is_exposed(&function.name),
                    indirect_exposures: Vec::new(),
                    is_suite: kind.is_suite,
                    is_test: kind.is_test,
                })
            })
            .collect()
    }
}

impl Default for ExposureAnalyzer {
    fn default() -> Self {
        Self::new(TestFramework::default())
    }
}

/// Candidate nodes by `(module name, function name)`. Two files may declare
/// the same module; references cannot tell them apart, so each name keeps
/// every node.
type CandidateIndex<'m> = FxHashMap<(&'m str, &'m str), SmallVec2<NodeIndex>>;

/// One node per candidate; one edge per caller/callee candidate pair.
///
/// Symbols are matched across files by `(module, name)` value, since each
/// file resolves its own. A name the caller's module does not define falls
/// back to its unknown wildcard imports. Self references are not edges.
fn build_graph(modules: &[AnalyzedTestModule]) -> ExposureGraph {
    let mut graph = ExposureGraph::new();
    let mut by_name: CandidateIndex<'_> = FxHashMap::default();

    for (m, module) in modules.iter().enumerate() {
        for (t, test) in module.tests.iter().enumerate() {
            let node = graph.add_node((m, t));
            let nodes = by_name
                .entry((test.module_name.as_str(), test.function.name.as_str()))
                .or_default();
            if let Some(&other) = nodes.first() {
                tracing::warn!(
                    module = %test.module_name,
                    function = %test.function.name,
                    first = %modules[graph[other].0].key,
                    second = %module.key,
                    "candidate declared by more than one file with the same module name"
                );
            }
            nodes.push(node);
        }
    }

    for source in graph.node_indices().collect::<Vec<_>>() {
        let (m, t) = graph[source];
        let Some(tree) = modules[m].declaration_tree.as_ref() else {
            continue;
        };
        for dep in &modules[m].tests[t].function.dependencies {
            let Some(symbol) = tree.symbol(dep.symbol) else {
                continue;
            };
            for &target in lookup_candidates(symbol, tree, &by_name) {
                if target == source {
                    continue;
                }
                match graph.find_edge(source, target) {
                    Some(edge) => {
                        let occurrences = &mut graph[edge];
                        occurrences.extend(dep.occurrences.iter().copied());
                        occurrences.sort_unstable();
                    }
                    None => {
                        graph.add_edge(source, target, dep.occurrences.clone());
                    }
                }
            }
        }
    }
    graph
}

fn lookup_candidates<'i>(
    symbol: &'i Symbol,
    tree: &'i DeclarationTree,
    by_name: &'i CandidateIndex<'_>,
) -> &'i [NodeIndex] {
    if symbol.parent_type_name.is_some() {
        return &[];
    }
    if let Some(nodes) = by_name.get(&(symbol.module_name.as_str(), symbol.name.as_str())) {
        return nodes;
    }
    if symbol.module_name != tree.module_name() || tree.function(&symbol.name).is_some() {
        return &[];
    }
    tree.wildcard_imports
        .iter()
        .find_map(|module| by_name.get(&(module.as_str(), symbol.name.as_str())))
        .map(|nodes| nodes.as_slice())
        .unwrap_or(&[])
}

/// Breadth-first propagation from every candidate.
///
/// Each `source -> target` edge records one exposure on `target`,
/// attributed to `source`, its immediate caller. Visited edges and recorded
/// `(target, caller module, caller)` triples are never revisited, which
/// breaks cycles.
fn propagate(graph: &ExposureGraph, modules: &[AnalyzedTestModule]) -> Vec<(NodeIndex, IndirectExposure)> {
    let mut exposures = Vec::new();
    let mut visited_edges: FxHashSet<(NodeIndex, NodeIndex)> = FxHashSet::default();
    let mut recorded: FxHashSet<(NodeIndex, &str, &str)> = FxHashSet::default();
    let mut queue: VecDeque<NodeIndex> = graph.node_indices().collect();

    while let Some(source) = queue.pop_front() {
        let (m, t) = graph[source];
        let caller = &modules[m].tests[t];

        let mut edges: Vec<_> = graph.edges(source).collect();
        edges.sort_by_key(|edge| edge.id());

        for edge in edges {
            let target = edge.target();
            if !visited_edges.insert((source, target)) {
                continue;
            }
            if recorded.insert((target, modules[m].key.as_str(), caller.function.name.as_str())) {
                exposures.push((
                    target,
                    IndirectExposure {
                        from_module_key: modules[m].key.clone(),
                        from_function: caller.function.name.clone(),
                        occurrences: edge.weight().clone(),
                    },
                ));
            }
            queue.push_back(target);
        }
    }
    exposures
}
