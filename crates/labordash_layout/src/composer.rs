//! Layout composer: builds the dashboard tree from a metrics snapshot.
//!
//! Composition is a pure function of the snapshot. Artifact files are only
//! referenced by URL, so their presence on disk never changes the output.

use crate::component::{
    Card, Component, Embed, Finding, MetricCard, NavLink, Navbar, Section, Tab, TabGroup, Tone,
    col, full_row, row,
};
use crate::error::{LayoutError, LayoutResult};
use crate::html::render_document;
use crate::node::{Element, Node};
use crate::shell::Shell;
use crate::validate;
use indexmap::IndexSet;
use labordash_core::{Artifact, MetricKey, MetricValue, MetricsSnapshot};

/// Section anchors in page order
pub const SECTION_ANCHORS: [&str; 5] = ["summary", "demand", "supply", "jobs", "shortage"];

/// Page and navbar title
pub const PAGE_TITLE: &str = "Industrial Machinery Mechanics Forecast";

const NAVBAR_ID: &str = "main-navbar";
const FRAME_HEIGHT: u32 = 500;
const FRAME_HEIGHT_PAIRED: u32 = 400;
const FRAME_HEIGHT_TALL: u32 = 600;
const OFFICIAL_PROJECTION: &str = "NC Commerce Official Projection";

/// A composed, validated dashboard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    root: Element,
    metrics: Vec<&'static str>,
    artifacts: Vec<Artifact>,
}

impl Page {
    /// Root `<html>` element
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize to an HTML document
    #[must_use]
    pub fn render(&self) -> String {
        render_document(&self.root)
    }

    /// Metric keys the page displays, in first-use order
    #[must_use]
    pub fn referenced_metrics(&self) -> &[&'static str] {
        &self.metrics
    }

    /// Artifacts the page embeds, in page order
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

/// Builds the dashboard page from a snapshot
pub struct Composer<'a> {
    snapshot: &'a MetricsSnapshot,
    metrics: IndexSet<&'static str>,
    artifacts: IndexSet<Artifact>,
}

impl<'a> Composer<'a> {
    /// Create a composer over a snapshot
    #[must_use]
    pub fn new(snapshot: &'a MetricsSnapshot) -> Self {
        Self {
            snapshot,
            metrics: IndexSet::new(),
            artifacts: IndexSet::new(),
        }
    }

    /// Build and validate the page
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Core` if a referenced metric is missing from the
    /// snapshot, or `LayoutError::Invalid` if the tree breaks a structural
    /// invariant
    pub fn compose(mut self) -> LayoutResult<Page> {
        let content: Vec<Node> = vec![
            navbar().render().into(),
            intro().into(),
            self.summary()?.render().into(),
            self.demand()?.render().into(),
            self.supply()?.render().into(),
            self.jobs()?.render().into(),
            self.shortage()?.render().into(),
            footer().into(),
        ];

        let root = Shell::new(PAGE_TITLE, NAVBAR_ID).wrap(content);
        validate::check_page(&root).map_err(|issues| LayoutError::Invalid { issues })?;

        tracing::debug!(
            metrics = self.metrics.len(),
            artifacts = self.artifacts.len(),
            "composed dashboard page"
        );

        Ok(Page {
            root,
            metrics: self.metrics.into_iter().collect(),
            artifacts: self.artifacts.into_iter().collect(),
        })
    }

    fn metric(&mut self, key: MetricKey) -> LayoutResult<MetricValue> {
        let value = *self.snapshot.metric(key)?;
        self.metrics.insert(key.as_str());
        Ok(value)
    }

    fn embed(&mut self, artifact: Artifact, height_px: u32) -> Node {
        self.artifacts.insert(artifact);
        Embed::new(artifact, height_px).render().into()
    }

    fn card(
        &mut self,
        key: MetricKey,
        title: &str,
        caption: &str,
        tone: Tone,
    ) -> LayoutResult<Node> {
        let value = self.metric(key)?;
        let card = MetricCard {
            title: title.to_string(),
            metric: key.as_str(),
            value: value.grouped(),
            caption: caption.to_string(),
            tone,
        };
        Ok(card.render().into())
    }

    fn summary(&mut self) -> LayoutResult<Section> {
        let cards = row("").children([
            self.card(
                MetricKey::INITIAL_WORKFORCE,
                "Current Workforce (2025)",
                OFFICIAL_PROJECTION,
                Tone::Primary,
            )?,
            self.card(
                MetricKey::FINAL_WORKFORCE,
                "Projected Workforce (2030)",
                OFFICIAL_PROJECTION,
                Tone::Primary,
            )?,
            self.card(
                MetricKey::AVG_MONTHLY_SHORTAGE,
                "Average Monthly Shortages",
                "Forecasted positions remaining vacant each month",
                Tone::Danger,
            )?,
            self.card(
                MetricKey::TOTAL_CUMULATIVE_SHORTAGE,
                "Cumulative Shortage",
                "Forecasted unfilled positions over 5-year period",
                Tone::Danger,
            )?,
        ]);

        let synthesis = Card {
            title: "Supply-Demand-Shortage Synthesis".to_string(),
            body: vec![
                self.embed(Artifact::CENTRAL_VISUALIZATION, FRAME_HEIGHT),
                Finding::key(
                    "The Industrial Machinery Mechanics workforce in Charlotte faces significant \
                     shortages through 2030, driven by high replacement demand (80% of openings \
                     from transfers and exits) and insufficient training pipeline capacity.",
                )
                .render()
                .into(),
            ],
        };

        let training = self.metric(MetricKey::TRAINING_MULTIPLIER_NEEDED)?;
        let mobility = self.metric(MetricKey::MOBILITY_MULTIPLIER_NEEDED)?;

        let solutions = Card {
            title: "Addressing the Shortage".to_string(),
            body: vec![
                row("")
                    .child(solution(
                        "Training Pipeline Expansion",
                        vec![
                            "Increasing training capacity by ".into(),
                            multiplier(&training),
                            " would close the shortage gap by 2030".into(),
                        ],
                        "View Training Analysis",
                        "supply",
                    ))
                    .child(solution(
                        "Career Mobility Enhancement",
                        vec![
                            "Increasing mobility inflows by ".into(),
                            multiplier(&mobility),
                            " from similar occupations would close the shortage gap".into(),
                        ],
                        "View Mobility Analysis",
                        "supply",
                    ))
                    .child(solution(
                        "Matching Efficiency Improvement",
                        vec![
                            "Improving the match between workforce supply and demand would \
                             invariably reduce shortages through better placement services"
                                .into(),
                        ],
                        "View Matching Analysis",
                        "shortage",
                    ))
                    .into(),
            ],
        };

        Ok(Section {
            anchor: "summary".to_string(),
            title: "Executive Summary".to_string(),
            subtitle: "Projected workforce shortages driven by aging workforce, insufficient \
                       training pipeline capacity, and significant turnover"
                .to_string(),
            rows: vec![
                cards,
                full_row("mb-4", vec![synthesis.render().into()]),
                full_row("mb-5", vec![solutions.render().into()]),
            ],
        })
    }

    fn demand(&mut self) -> LayoutResult<Section> {
        let tabs = vec![
            Tab::new(
                "tab-scenario",
                "Scenario Forecasts",
                vec![
                    self.embed(Artifact::SCENARIO_FORECASTS, FRAME_HEIGHT),
                    Finding::key(
                        "Baseline projections show a steady demand for Industrial Machinery \
                         Mechanics, with monthly job postings ranging from 50-70 positions \
                         through 2030.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-components",
                "Demand Components",
                vec![
                    self.embed(Artifact::DEMAND_BREAKDOWN, FRAME_HEIGHT),
                    Finding::key(
                        "Replacement demand (exits and transfers) represents over 80% of total \
                         demand, highlighting the impact of an aging and mobile workforce.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-composition",
                "Demand Composition",
                vec![
                    self.embed(Artifact::DEMAND_COMPOSITION, FRAME_HEIGHT),
                    Finding::key(
                        "Only 20% of demand comes from workforce growth, while 32.8% is from \
                         workforce exits (retirement) and 47.3% from occupational transfers.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-model",
                "Model Comparison",
                vec![
                    self.embed(Artifact::MODEL_FORECASTS, FRAME_HEIGHT),
                    Finding::note(
                        "A hybrid SARIMAX/Prophet ensemble with time-varying weights provides \
                         optimal forecast accuracy, accounting for both short-term patterns and \
                         long-term structural factors.",
                    )
                    .render()
                    .into(),
                ],
            ),
        ];

        Ok(tabbed_section(
            "demand",
            "Demand Analysis",
            "Job posting forecasts and composition analysis for Industrial Machinery Mechanics \
             in Charlotte region",
            TabGroup::new("demand-tabs", "tab-scenario", tabs)?,
        ))
    }

    fn supply(&mut self) -> LayoutResult<Section> {
        let tabs = vec![
            Tab::new(
                "tab-employment",
                "Employment Trajectory",
                vec![
                    self.embed(Artifact::EMPLOYMENT_COMPARISON, FRAME_HEIGHT),
                    Finding::key(
                        "Without intervention, the employed workforce will fall significantly \
                         short of NC Commerce projections, creating persistent shortages.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-workforce",
                "Workforce Composition",
                vec![
                    self.embed(Artifact::WORKFORCE_COMPOSITION, FRAME_HEIGHT),
                    Finding::key(
                        "Mobility outflows are particularly strong, with retirements making up \
                         the largest portion of separations. Mobility inflows are taken from the \
                         pool of workers from the 10 most similar occupations (as defined by \
                         O*NET) and their respective mobility rates, which contribute to an \
                         available pool of workers. Retirement distributions from 2024 \
                         distribution show a mid-heavy, noting the value of technical expertise \
                         in this occupation and low younger entrants. Age distribution for this \
                         occupation comes from the latest IPUMS data in North Carolina.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-enrollment",
                "Enrollment & Graduates",
                vec![
                    row("")
                        .child(col("col-12 col-lg-6").child(
                            self.embed(Artifact::ENROLLMENT_PROJECTIONS, FRAME_HEIGHT_PAIRED),
                        ))
                        .child(col("col-12 col-lg-6").child(self.embed(
                            Artifact::HISTORICAL_PROJECTED_GRADUATES,
                            FRAME_HEIGHT_PAIRED,
                        )))
                        .into(),
                    Finding::key(
                        "Current enrollment projections generated from the NC Tower database \
                         show modest growth that is insufficient to meet workforce demand \
                         without targeted intervention. Certificate programs produce the most \
                         graduates and are the only ones actually growing, whereas shorter \
                         Diploma programs may need to be expanded to address immediate \
                         shortages.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-completion",
                "Completion Rates",
                vec![
                    self.embed(Artifact::COMPLETION_TIMING, FRAME_HEIGHT),
                    Finding::key(
                        "Certificate and Diploma programs have shorter completion times, \
                         allowing for quicker workforce entry, while Associate's Degrees take \
                         2-3 years on average to complete.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-patterns",
                "Graduate Patterns",
                vec![
                    self.embed(Artifact::MONTHLY_GRADUATES, FRAME_HEIGHT),
                    Finding::key(
                        "Talent pipeline growth is spurred by Certificate completions, but \
                         slowing down. Monthly graduation patterns from annual data (due to data \
                         availability) mask some seasonality that affects the timing of \
                         workforce entry, with expected peaks in May-June and December.",
                    )
                    .render()
                    .into(),
                ],
            ),
        ];

        Ok(tabbed_section(
            "supply",
            "Workforce Supply Analysis",
            "Training pipeline capacity and workforce flow analysis for Industrial Machinery \
             Mechanics",
            TabGroup::new("supply-tabs", "tab-employment", tabs)?,
        ))
    }

    fn jobs(&mut self) -> LayoutResult<Section> {
        let tabs = vec![
            Tab::new(
                "tab-clusters",
                "Job Clusters",
                vec![
                    self.embed(Artifact::JOB_CLUSTERS, FRAME_HEIGHT_TALL),
                    Finding::key(
                        "Job titles within this SOC occupation cluster into three functional \
                         groups across the following boundaries based on similarity in skills \
                         and roles: 'Maintenance & Technical Specialists', 'Design & \
                         Engineering Specialists', and 'Quality & Process Specialists'.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-occupation",
                "Occupational Distribution",
                vec![
                    self.embed(Artifact::OCCUPATION_DISTRIBUTION, FRAME_HEIGHT),
                    Finding::key(
                        "Traditional occupational boundaries (SOC codes) don't fully capture the \
                         functional similarity between jobs that require similar skill sets.",
                    )
                    .render()
                    .into(),
                ],
            ),
            Tab::new(
                "tab-skills",
                "Skill Patterns",
                vec![
                    self.embed(Artifact::SKILL_HEATMAP, FRAME_HEIGHT_TALL),
                    Finding::key(
                        "Each functional cluster has distinct skill patterns: maintenance \
                         specialists focus on equipment, repair and troubleshooting; engineering \
                         specialists on design and systems analysis; quality specialists on \
                         process control.",
                    )
                    .render()
                    .into(),
                ],
            ),
        ];

        Ok(tabbed_section(
            "jobs",
            "Occupational Evolution Analysis",
            "Skill clustering and job title analysis showing how Industrial Machinery Mechanics \
             roles are evolving",
            TabGroup::new("jobs-tabs", "tab-clusters", tabs)?,
        ))
    }

    fn shortage(&mut self) -> LayoutResult<Section> {
        let monthly = self.metric(MetricKey::AVG_MONTHLY_SHORTAGE)?;

        let projection = Tab::new(
            "tab-shortage",
            "Shortage Projections",
            vec![
                self.embed(Artifact::SHORTAGE_COMPARISON, FRAME_HEIGHT),
                Finding::key(format!(
                    "Monthly shortages persist even with optimal training and inflow scenarios \
                     (albeit much less), with the baseline showing approximately {} unfilled \
                     positions per month on average.",
                    monthly.plain()
                ))
                .render()
                .into(),
            ],
        );

        let parameters = row("")
            .child(
                col("col-12 col-lg-6")
                    .child(self.embed(Artifact::TIME_VARIANT_PARAMETERS, FRAME_HEIGHT))
                    .child(
                        Finding::key(
                            "Time-variant parameters reveal how retirement rates increase over \
                             time due to workforce aging (IPUMS), while transfer rates fluctuate \
                             with economic conditions. These include unemployment variations \
                             around the natural rate for Charlotte (BLS) or wage differentials \
                             with similar occupations (NC Commerce).",
                        )
                        .with_spacing("mt-2 mb-4")
                        .render(),
                    ),
            )
            .child(
                col("col-12 col-lg-6")
                    .child(self.embed(Artifact::MATCHING_EFFICIENCY, FRAME_HEIGHT))
                    .child(
                        Finding::key(
                            "Matching efficiency hovers around a standard 0.7 (70%), fluctuating \
                             as the economy changes (high labor market slack suggests high \
                             unemployment so employers can be more selective and filter out many \
                             less-suited candidates, while in a tight labor market there are less \
                             available workers so employers invest more resources in recruiting \
                             and must be less selective), and calibration based on the divergence \
                             between the model's employment and inflow figures from NC Commerce \
                             official forecasts.",
                        )
                        .with_spacing("mt-2")
                        .render(),
                    ),
            );

        let tabs = vec![
            projection,
            Tab::new("tab-parameters", "Model Parameters", vec![parameters.into()]),
        ];

        Ok(tabbed_section(
            "shortage",
            "Shortage Projections & Parameters",
            "Projected workforce shortages and key model parameters influencing the labor market",
            TabGroup::new("shortage-tabs", "tab-shortage", tabs)?,
        ))
    }
}

fn navbar() -> Navbar {
    Navbar {
        id: NAVBAR_ID.to_string(),
        brand: PAGE_TITLE.to_string(),
        links: vec![
            NavLink::new("Executive Summary", "summary"),
            NavLink::new("Demand Analysis", "demand"),
            NavLink::new("Supply Analysis", "supply"),
            NavLink::new("Job Evolution", "jobs"),
            NavLink::new("Shortage Projections", "shortage"),
        ],
    }
}

fn intro() -> Element {
    let panel = Element::new("div")
        .class("p-3 bg-light rounded")
        .child(
            Element::new("h2")
                .class("text-primary")
                .text("Industrial Machinery Mechanics Workforce Forecast (2025-2030)"),
        )
        .child(Element::new("p").class("lead").text(
            "Predicting workforce shortages in the Charlotte region using supply-demand labor \
             market modeling",
        ))
        .child(
            Element::new("p")
                .text(
                    "This dashboard presents the projected workforce shortages for Industrial \
                     Machinery Mechanics in Charlotte, utilizing ",
                )
                .child(Element::new("strong").text("dual-pool modeling"))
                .text(
                    " to track both employed workers and the available pool of qualified \
                     candidates.",
                ),
        )
        .child(Element::new("hr"));

    full_row("mb-4", vec![panel.into()])
}

fn footer() -> Element {
    row("").child(
        col("col-12").child(Element::new("hr")).child(
            Element::new("p")
                .class("text-center text-muted")
                .text("\u{a9} 2025 Radius Intelligence"),
        ),
    )
}

fn multiplier(value: &MetricValue) -> Node {
    Element::new("strong")
        .text(format!("{}x", value.plain()))
        .into()
}

fn solution(heading: &str, text: Vec<Node>, button: &str, anchor: &str) -> Element {
    col("col-12 col-md-4")
        .child(Element::new("h6").class("mb-3").text(heading))
        .child(Element::new("p").children(text))
        .child(
            Element::new("a")
                .class("btn btn-outline-primary btn-sm mt-2")
                .attr("href", format!("#{}", anchor))
                .text(button),
        )
}

fn tabbed_section(anchor: &str, title: &str, subtitle: &str, tabs: TabGroup) -> Section {
    Section {
        anchor: anchor.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        rows: vec![full_row("mb-5", vec![tabs.render().into()])],
    }
}
