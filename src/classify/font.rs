//! Font-size statistics and ranking.

use super::line::TextLine;

/// Number of sample texts kept per size cluster for diagnostics.
const SAMPLES_PER_CLUSTER: usize = 3;

/// Font sizes that are treated as one typographic size.
#[derive(Debug, Clone)]
pub struct SizeCluster {
    /// Largest size in the cluster
    pub max: f32,
    /// Smallest size in the cluster
    pub min: f32,
    /// Characters set in this cluster
    pub chars: usize,
    /// Lines set in this cluster
    pub lines: usize,
    /// A few line texts, for debug output
    pub samples: Vec<String>,
}

impl SizeCluster {
    fn new(size: f32) -> Self {
        Self {
            max: size,
            min: size,
            chars: 0,
            lines: 0,
            samples: Vec::new(),
        }
    }

    fn contains(&self, size: f32) -> bool {
        size >= self.min - f32::EPSILON && size <= self.max + f32::EPSILON
    }
}

/// Distinct font sizes ranked largest first.
///
/// Rank 0 is the largest cluster. Sizes within `tolerance` of a cluster's
/// largest member join that cluster.
#[derive(Debug, Clone, Default)]
pub struct FontRanking {
    clusters: Vec<SizeCluster>,
}

impl FontRanking {
    /// Build the ranking from grouped lines.
    pub fn from_lines(lines: &[TextLine], tolerance: f32) -> Self {
        let mut sizes: Vec<f32> = lines.iter().map(|l| l.font_size).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();

        let mut clusters: Vec<SizeCluster> = Vec::new();
        for size in sizes {
            match clusters.last_mut() {
                Some(cluster) if cluster.max - size <= tolerance => cluster.min = size,
                _ => clusters.push(SizeCluster::new(size)),
            }
        }

        let mut ranking = Self { clusters };
        for line in lines {
            if let Some(rank) = ranking.rank_of(line.font_size) {
                let cluster = &mut ranking.clusters[rank];
                cluster.chars += line.char_count();
                cluster.lines += 1;
                if cluster.samples.len() < SAMPLES_PER_CLUSTER {
                    cluster.samples.push(line.text());
                }
            }
        }

        ranking
    }

    /// Rank of the cluster holding `size`.
    pub fn rank_of(&self, size: f32) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(size))
    }

    /// Rank of the body-text cluster (most characters; smaller size wins ties).
    pub fn body_rank(&self) -> Option<usize> {
        self.clusters
            .iter()
            .enumerate()
            .max_by_key(|(rank, c)| (c.chars, *rank))
            .map(|(rank, _)| rank)
    }

    /// Number of distinct size clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if no sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// All clusters, largest first.
    pub fn clusters(&self) -> &[SizeCluster] {
        &self.clusters
    }

    /// Log the size histogram with sample texts.
    pub fn log_histogram(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("Font sizes and sample texts:");
        for (rank, c) in self.clusters.iter().enumerate() {
            log::debug!(
                "  rank {} ({:.1}-{:.1}pt): {} lines, {} chars, {:?}",
                rank,
                c.min,
                c.max,
                c.lines,
                c.chars,
                c.samples
            );
        }
    }
}
