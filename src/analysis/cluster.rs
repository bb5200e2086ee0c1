//! Deterministic k-means over TF-IDF rows.

const MAX_ITERATIONS: usize = 300;

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Farthest-first seeding: start from the first point, then repeatedly take
/// the point farthest from its nearest chosen centroid.
fn seed(points: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
    let mut centroids = vec![points[0].clone()];
    while centroids.len() < k {
        let mut far = 0;
        let mut far_dist = -1.0;
        for (i, p) in points.iter().enumerate() {
            let d = centroids
                .iter()
                .map(|c| squared_distance(p, c))
                .fold(f64::INFINITY, f64::min);
            if d > far_dist {
                far = i;
                far_dist = d;
            }
        }
        centroids.push(points[far].clone());
    }
    centroids
}

/// Assign each point to one of `k` clusters. Labels are in `0..k`.
///
/// `k` is clamped to the number of points; an empty input yields no labels.
pub fn kmeans(points: &[Vec<f64>], k: usize) -> Vec<usize> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(points.len());
    let dims = points[0].len();

    let mut centroids = seed(points, k);
    let mut labels: Vec<usize> = points.iter().map(|p| nearest(p, &centroids)).collect();

    for _ in 0..MAX_ITERATIONS {
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&Vec<f64>> = points
                .iter()
                .zip(&labels)
                .filter(|(_, &l)| l == cluster)
                .map(|(p, _)| p)
                .collect();
            // An emptied cluster keeps its previous centroid.
            if members.is_empty() {
                continue;
            }
            let n = members.len() as f64;
            *centroid = (0..dims)
                .map(|d| members.iter().map(|p| p[d]).sum::<f64>() / n)
                .collect();
        }

        let next: Vec<usize> = points.iter().map(|p| nearest(p, &centroids)).collect();
        if next == labels {
            break;
        }
        labels = next;
    }

    labels
}

/// Top `n` terms of each cluster by mean TF-IDF weight of its members.
pub fn cluster_keywords(
    rows: &[Vec<f64>],
    labels: &[usize],
    vocabulary: &[String],
    n: usize,
) -> Vec<Vec<String>> {
    let Some(&max_label) = labels.iter().max() else {
        return Vec::new();
    };

    (0..=max_label)
        .map(|cluster| {
            let members: Vec<&Vec<f64>> = rows
                .iter()
                .zip(labels)
                .filter(|(_, &l)| l == cluster)
                .map(|(r, _)| r)
                .collect();
            if members.is_empty() {
                return Vec::new();
            }

            let count = members.len() as f64;
            let mut scored: Vec<(usize, f64)> = (0..vocabulary.len())
                .map(|t| (t, members.iter().map(|r| r[t]).sum::<f64>() / count))
                .collect();
            scored.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });

            scored
                .into_iter()
                .take(n)
                .map(|(t, _)| vocabulary[t].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separates_obvious_groups() {
        let points = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.9, 0.1],
            vec![0.1, 0.9],
        ];
        let labels = kmeans(&points, 2);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[1], labels[3]);
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_k_is_clamped_and_deterministic() {
        let points = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let first = kmeans(&points, 5);
        assert_eq!(first, kmeans(&points, 5));
        assert_eq!(first, vec![0, 1]);
        assert!(kmeans(&[], 3).is_empty());
    }

    #[test]
    fn test_cluster_keywords() {
        let vocabulary = vec!["async".to_string(), "macros".to_string(), "rust".to_string()];
        let rows = vec![vec![0.8, 0.0, 0.6], vec![0.0, 0.8, 0.6]];
        let keywords = cluster_keywords(&rows, &[0, 1], &vocabulary, 2);
        assert_eq!(keywords, vec![vec!["async", "rust"], vec!["macros", "rust"]]);
    }
}
