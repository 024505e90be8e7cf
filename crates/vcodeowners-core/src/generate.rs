//! Random virtual CODEOWNERS file generation for benchmarking and testing.
//!
//! Builds the tree directly and renders it with the canonical renderer,
//! so the output always parses without anomalies. Each fixture comes with a
//! team map covering the virtual teams it refers to.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::format::render_codeowners;
use crate::parse::{Cst, Line, Owner, Rule, SectionHeading};
use crate::teams::TeamMap;

/// Configuration for generating virtual CODEOWNERS files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of rule lines to generate.
    pub num_rules: usize,
    /// Number of comment lines to generate.
    pub num_comments: usize,
    /// Number of section headings to generate.
    pub num_sections: usize,
    /// Maximum owners per rule (1-4 typical).
    pub max_owners_per_rule: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_rules: 100,
            num_comments: 20,
            num_sections: 5,
            max_owners_per_rule: 4,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with specified rules and proportional comments
    /// and sections.
    pub fn new(num_rules: usize) -> Self {
        Self {
            num_rules,
            num_comments: num_rules / 5,
            num_sections: num_rules / 20,
            ..Default::default()
        }
    }

    /// Small fixture (~10 rules).
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Medium fixture (~100 rules).
    pub fn medium() -> Self {
        Self::new(100)
    }

    /// Large fixture (~1000 rules).
    pub fn large() -> Self {
        Self::new(1_000)
    }

    /// Extra large fixture (~10k rules).
    pub fn xlarge() -> Self {
        Self::new(10_000)
    }

    /// Generate a file targeting approximately the given byte size.
    ///
    /// Note: Actual size varies based on pattern/owner complexity.
    pub fn target_bytes(bytes: usize) -> Self {
        // Average line is ~45 bytes
        Self::new(bytes.saturating_div(45).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of comments explicitly.
    pub fn with_comments(mut self, num_comments: usize) -> Self {
        self.num_comments = num_comments;
        self
    }

    /// Set the number of section headings explicitly.
    pub fn with_sections(mut self, num_sections: usize) -> Self {
        self.num_sections = num_sections;
        self
    }

    /// Set the maximum owners per rule.
    pub fn with_max_owners(mut self, max: usize) -> Self {
        self.max_owners_per_rule = max.max(1);
        self
    }
}

/// Vocabulary for generating realistic patterns and owners.
mod vocabulary {
    pub const PATTERN_TEMPLATES: &[&str] = &[
        "*",
        "*.{ext}",
        "**/*.{ext}",
        "{dir}/",
        "/{dir}/",
        "/{dir}/**",
        "/{dir}/*.{ext}",
        "/src/{dir}/",
        "/src/**/*.{ext}",
        "/{dir}/**/test_*.{ext}",
        "docs/**/*.md",
    ];

    pub const EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "md", "yaml", "json", "toml"];
    pub const DIRECTORIES: &[&str] = &[
        "src", "lib", "tests", "docs", "config", "scripts", "api", "core",
    ];
    pub const USERNAMES: &[&str] = &["alice", "bob", "charlie", "dev", "maintainer", "reviewer"];
    pub const ORGS: &[&str] = &["acme", "github", "myorg"];
    pub const VIRTUAL_TEAMS: &[&str] = &["core", "platform", "frontend", "backend", "infra", "docs"];
    pub const SECTION_NAMES: &[&str] = &["Frontend", "Backend", "Infrastructure", "Documentation"];
    pub const COMMENTS: &[&str] = &[
        "owned by the people who know",
        "ask in the team channel first",
        "generated files",
        "keep sorted",
    ];
}

/// Owner type distribution weights (must sum to 100).
const WEIGHT_VIRTUAL_TEAM: u32 = 40;
const WEIGHT_USER: u32 = 30;
const WEIGHT_REAL_TEAM: u32 = 15;
// Remaining weight (15) goes to email

/// Probability of inserting a comment line (percentage).
const COMMENT_PROBABILITY: u32 = 20;

/// Probability of starting a new section before a rule (percentage).
const SECTION_PROBABILITY: u32 = 5;

/// Probability of a rule inside a section relying on the section owners.
const INHERIT_PROBABILITY: u32 = 25;

/// Probability of a rule or heading carrying an inline comment.
const INLINE_COMMENT_PROBABILITY: u32 = 10;

/// A generated virtual CODEOWNERS file with its team map.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// The virtual CODEOWNERS content.
    pub content: String,
    /// The team map the content refers to.
    pub team_map: TeamMap,
}

impl Fixture {
    /// The team map as JSON, in the shape `parse_team_map` reads.
    pub fn team_map_json(&self) -> String {
        serde_json::to_string_pretty(&self.team_map).unwrap_or_else(|_| "{}".to_string())
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Generates a team map for all virtual teams in the vocabulary.
pub fn generate_team_map(config: &GeneratorConfig) -> TeamMap {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    VIRTUAL_TEAMS
        .iter()
        .map(|team| {
            let size = rng.random_range(1..=3);
            let members = (0..size)
                .map(|_| {
                    let user = pick(&mut rng, USERNAMES);
                    if rng.random_ratio(1, 5) {
                        format!("{}@example.com", user)
                    } else {
                        user.to_string()
                    }
                })
                .collect();
            (team.to_string(), members)
        })
        .collect()
}

fn maybe_inline_comment(rng: &mut StdRng) -> String {
    if rng.random_ratio(INLINE_COMMENT_PROBABILITY, 100) {
        format!(" {}", pick(rng, vocabulary::COMMENTS))
    } else {
        String::new()
    }
}

/// Generates a random tree based on configuration.
///
/// Note: rule and section heading lines carry an empty `raw`; render the
/// tree before relying on line text.
pub fn generate_cst(config: &GeneratorConfig) -> Cst {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let capacity = config.num_rules + config.num_comments + 2 * config.num_sections + 4;
    let mut lines = Vec::with_capacity(capacity);
    let mut line_no = 0;
    let mut next_line_no = || {
        line_no += 1;
        line_no
    };

    lines.push(Line::comment(next_line_no(), "# Virtual CODEOWNERS for benchmarking"));
    lines.push(Line::ignorable_comment(next_line_no(), "#! not copied to CODEOWNERS"));
    lines.push(Line::empty(next_line_no(), ""));

    let mut rules_added = 0;
    let mut comments_added = 0;
    let mut sections_added = 0;
    let mut section = String::new();

    while rules_added < config.num_rules {
        if sections_added < config.num_sections
            && rules_added > 0
            && rng.random_ratio(SECTION_PROBABILITY, 100)
        {
            let name = format!("{} {}", pick(&mut rng, SECTION_NAMES), sections_added + 1);
            let owners = generate_owners(&mut rng, config.max_owners_per_rule);
            lines.push(Line::empty(next_line_no(), ""));
            lines.push(Line::section_heading(
                next_line_no(),
                "",
                SectionHeading {
                    optional: rng.random_ratio(1, 4),
                    name: name.clone(),
                    min_approvers: rng.random_range(0..3),
                    spacing: " ".to_string(),
                    owners,
                    inline_comment: maybe_inline_comment(&mut rng),
                },
            ));
            section = name;
            sections_added += 1;
        }

        if comments_added < config.num_comments
            && rules_added > 0
            && rng.random_ratio(COMMENT_PROBABILITY, 100)
        {
            let comment = format!("# {}", pick(&mut rng, COMMENTS));
            lines.push(Line::comment(next_line_no(), comment));
            comments_added += 1;
        }

        let template = pick(&mut rng, PATTERN_TEMPLATES);
        let ext = pick(&mut rng, EXTENSIONS);
        let dir = pick(&mut rng, DIRECTORIES);
        let pattern = template.replace("{ext}", ext).replace("{dir}", dir);

        let inherits = !section.is_empty() && rng.random_ratio(INHERIT_PROBABILITY, 100);
        let owners = if inherits {
            Vec::new()
        } else {
            generate_owners(&mut rng, config.max_owners_per_rule)
        };
        let spacing = if rng.random_ratio(1, 10) { "\t" } else { " " };

        lines.push(Line::rule(
            next_line_no(),
            "",
            Rule {
                pattern,
                section: section.clone(),
                spacing: if owners.is_empty() { String::new() } else { spacing.to_string() },
                owners,
                inline_comment: maybe_inline_comment(&mut rng),
            },
        ));
        rules_added += 1;
    }

    Cst::new(lines)
}

fn generate_owners(rng: &mut StdRng, max_owners: usize) -> Vec<Owner> {
    let count = rng.random_range(1..=max_owners.max(1));
    (0..count).map(|_| generate_owner(rng)).collect()
}

/// Generate a random owner based on weighted distribution.
fn generate_owner(rng: &mut StdRng) -> Owner {
    use vocabulary::*;

    let roll = rng.random_range(0..100);

    if roll < WEIGHT_VIRTUAL_TEAM {
        Owner::team_or_user(format!("@{}", pick(rng, VIRTUAL_TEAMS)))
    } else if roll < WEIGHT_VIRTUAL_TEAM + WEIGHT_USER {
        Owner::team_or_user(format!("@{}", pick(rng, USERNAMES)))
    } else if roll < WEIGHT_VIRTUAL_TEAM + WEIGHT_USER + WEIGHT_REAL_TEAM {
        Owner::team_or_user(format!("@{}/{}", pick(rng, ORGS), pick(rng, VIRTUAL_TEAMS)))
    } else {
        Owner::email(format!("{}@example.com", pick(rng, USERNAMES)))
    }
}

/// Generates a virtual CODEOWNERS file as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    render_codeowners(&generate_cst(config), "")
}

/// Generates a virtual CODEOWNERS file together with its team map.
pub fn generate_fixture(config: &GeneratorConfig) -> Fixture {
    Fixture {
        content: generate(config),
        team_map: generate_team_map(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_codeowners;
    use crate::teams::parse_team_map;

    #[test]
    fn round_trip_small() {
        let content = generate(&GeneratorConfig::small());
        let parsed = parse_codeowners(&content);
        assert!(
            parsed.is_ok(),
            "Generated content should parse: {:?}",
            parsed.anomalies
        );
    }

    #[test]
    fn round_trip_large() {
        let content = generate(&GeneratorConfig::large());
        let parsed = parse_codeowners(&content);
        assert!(parsed.is_ok(), "{:?}", parsed.anomalies);
        assert_eq!(parsed.cst.rules().count(), 1_000);
        assert!(parsed.cst.section_headings().count() > 0);
    }

    #[test]
    fn ignorable_comment_is_dropped_from_output() {
        let content = generate(&GeneratorConfig::small());
        assert!(!content.contains("#!"));
    }

    #[test]
    fn deterministic_generation() {
        let config = GeneratorConfig::medium();
        let content1 = generate(&config);
        let content2 = generate(&config);
        assert_eq!(content1, content2, "Same seed should produce same output");
    }

    #[test]
    fn different_seeds_differ() {
        let content1 = generate(&GeneratorConfig::medium().with_seed(1));
        let content2 = generate(&GeneratorConfig::medium().with_seed(2));
        assert_ne!(content1, content2);
    }

    #[test]
    fn target_bytes_approximate() {
        let config = GeneratorConfig::target_bytes(100_000);
        let content = generate(&config);
        // Should be within 2x of target
        assert!(
            content.len() > 50_000 && content.len() < 200_000,
            "Got {} bytes",
            content.len()
        );
    }

    #[test]
    fn zero_rules_produces_header_only() {
        let content = generate(&GeneratorConfig::new(0));
        let parsed = parse_codeowners(&content);
        assert!(parsed.is_ok());
        assert_eq!(parsed.cst.rules().count(), 0);
    }

    #[test]
    fn single_rule_works() {
        let content = generate(&GeneratorConfig::new(1));
        let parsed = parse_codeowners(&content);
        assert!(parsed.is_ok());
        assert_eq!(parsed.cst.rules().count(), 1);
    }

    #[test]
    fn team_map_covers_virtual_teams_and_reads_back() {
        let fixture = generate_fixture(&GeneratorConfig::small());
        assert_eq!(fixture.team_map.len(), vocabulary::VIRTUAL_TEAMS.len());
        let decoded = parse_team_map(&fixture.team_map_json()).unwrap();
        assert_eq!(decoded, fixture.team_map);
    }

    #[test]
    fn with_overrides() {
        let config = GeneratorConfig::new(100).with_comments(50).with_sections(0);
        assert_eq!(config.num_comments, 50);
        assert_eq!(config.num_sections, 0);
        let parsed = parse_codeowners(&generate(&config));
        assert_eq!(parsed.cst.section_headings().count(), 0);
    }

    #[test]
    fn with_max_owners_minimum() {
        let config = GeneratorConfig::default().with_max_owners(0);
        assert_eq!(config.max_owners_per_rule, 1);
    }
}
