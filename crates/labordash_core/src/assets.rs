//! Visualization artifacts and the asset directory contract.
//!
//! Artifacts are pre-rendered chart files embedded by path. Nothing here parses
//! them; the manifest only reports which ones the asset directory lacks so the
//! host can warn at startup. A missing artifact never fails the page.

use std::fmt;
use std::path::{Path, PathBuf};

/// URL prefix under which the asset directory is served
pub const ASSET_ROUTE: &str = "/assets";

/// A pre-rendered visualization embedded by reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Artifact {
    /// Element id of the embedding frame
    pub frame_id: &'static str,
    /// File name relative to the asset directory
    pub file: &'static str,
}

impl Artifact {
    /// Supply-demand-shortage synthesis chart
    pub const CENTRAL_VISUALIZATION: Self = Self::new("central-viz", "central_visualization.html");
    /// Demand scenarios
    pub const SCENARIO_FORECASTS: Self = Self::new("scenario-forecasts", "scenario_forecasts.html");
    /// Demand components over time
    pub const DEMAND_BREAKDOWN: Self = Self::new("demand-breakdown", "demand_breakdown.html");
    /// Share of growth, exits and transfers
    pub const DEMAND_COMPOSITION: Self = Self::new("demand-composition", "demand_composition.html");
    /// Forecast model comparison
    pub const MODEL_FORECASTS: Self = Self::new("model-forecasts", "model_forecasts.html");
    /// Modeled employment against official projections
    pub const EMPLOYMENT_COMPARISON: Self =
        Self::new("employment-comparison", "employment_comparison.html");
    /// Inflows, outflows and age distribution
    pub const WORKFORCE_COMPOSITION: Self =
        Self::new("workforce_composition", "workforce_composition.html");
    /// Program enrollment projections
    pub const ENROLLMENT_PROJECTIONS: Self =
        Self::new("enrollment-projections", "enrollment_projections.html");
    /// Historical and projected graduates
    pub const HISTORICAL_PROJECTED_GRADUATES: Self = Self::new(
        "historical-projected-graduates",
        "historical_projected_graduates.html",
    );
    /// Program completion timing
    pub const COMPLETION_TIMING: Self = Self::new("completion_timing", "completion_timing.html");
    /// Monthly graduates by credential
    pub const MONTHLY_GRADUATES: Self =
        Self::new("monthly-graduates", "monthly_graduates_stacked.html");
    /// t-SNE projection of job title clusters
    pub const JOB_CLUSTERS: Self = Self::new("job-clusters", "job_clusters_tsne.html");
    /// Cluster membership across SOC codes
    pub const OCCUPATION_DISTRIBUTION: Self =
        Self::new("occupation-distribution", "occupation_distribution.html");
    /// Skill intensity per cluster
    pub const SKILL_HEATMAP: Self = Self::new("skill-heatmap", "skill_heatmap.html");
    /// Shortage under each scenario
    pub const SHORTAGE_COMPARISON: Self =
        Self::new("shortage-comparison", "shortage_comparison.html");
    /// Retirement and transfer rates over time
    pub const TIME_VARIANT_PARAMETERS: Self =
        Self::new("time-variant-parameters", "time_variant_parameters.html");
    /// Matching efficiency over time
    pub const MATCHING_EFFICIENCY: Self =
        Self::new("matching-efficiency", "matching_efficiency.html");

    /// Every artifact the dashboard embeds, in page order
    pub const ALL: [Self; 17] = [
        Self::CENTRAL_VISUALIZATION,
        Self::SCENARIO_FORECASTS,
        Self::DEMAND_BREAKDOWN,
        Self::DEMAND_COMPOSITION,
        Self::MODEL_FORECASTS,
        Self::EMPLOYMENT_COMPARISON,
        Self::WORKFORCE_COMPOSITION,
        Self::ENROLLMENT_PROJECTIONS,
        Self::HISTORICAL_PROJECTED_GRADUATES,
        Self::COMPLETION_TIMING,
        Self::MONTHLY_GRADUATES,
        Self::JOB_CLUSTERS,
        Self::OCCUPATION_DISTRIBUTION,
        Self::SKILL_HEATMAP,
        Self::SHORTAGE_COMPARISON,
        Self::TIME_VARIANT_PARAMETERS,
        Self::MATCHING_EFFICIENCY,
    ];

    /// Create a new artifact reference
    #[must_use]
    pub const fn new(frame_id: &'static str, file: &'static str) -> Self {
        Self { frame_id, file }
    }

    /// URL path the page uses to load the artifact
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/{}", ASSET_ROUTE, self.file)
    }

    /// Location on disk under an asset directory
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file)
    }
}

/// Presence of one artifact on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// File exists and has content
    Present,
    /// File is absent or not a regular file
    Missing,
    /// File exists but is zero bytes
    Empty,
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Present => "present",
            Self::Missing => "missing",
            Self::Empty => "empty",
        };
        f.write_str(label)
    }
}

/// Result of checking an asset directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    /// Directory that was checked
    pub dir: PathBuf,
    /// Status per artifact, in manifest order
    pub entries: Vec<(Artifact, AssetStatus)>,
}

impl AssetReport {
    /// Artifacts that will render as a broken embed
    #[must_use]
    pub fn degraded(&self) -> Vec<(Artifact, AssetStatus)> {
        self.entries
            .iter()
            .filter(|(_, status)| *status != AssetStatus::Present)
            .copied()
            .collect()
    }

    /// Check if every artifact is present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|(_, s)| *s == AssetStatus::Present)
    }

    /// Number of present artifacts
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| *s == AssetStatus::Present)
            .count()
    }
}

/// The set of artifacts a page expects to find in its asset directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    artifacts: Vec<Artifact>,
}

impl AssetManifest {
    /// Manifest of every artifact the dashboard embeds
    #[must_use]
    pub fn standard() -> Self {
        Self {
            artifacts: Artifact::ALL.to_vec(),
        }
    }

    /// Create from an explicit list
    #[must_use]
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    /// Artifacts in manifest order
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Check which artifacts exist under `dir`
    ///
    /// Never fails; unreadable entries count as missing.
    #[must_use]
    pub fn check(&self, dir: &Path) -> AssetReport {
        let entries = self
            .artifacts
            .iter()
            .map(|artifact| {
                let status = match std::fs::metadata(artifact.path_in(dir)) {
                    Ok(meta) if meta.is_file() && meta.len() == 0 => AssetStatus::Empty,
                    Ok(meta) if meta.is_file() => AssetStatus::Present,
                    _ => AssetStatus::Missing,
                };
                (*artifact, status)
            })
            .collect();

        AssetReport {
            dir: dir.to_path_buf(),
            entries,
        }
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::standard()
    }
}
