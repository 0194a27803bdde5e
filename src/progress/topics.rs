use crate::error::AppError;

/// An entry of the algorithm reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmTopic {
    pub slug: &'static str,
    pub title: &'static str,
    pub category: &'static str,
}

impl AlgorithmTopic {
    /// Video search link for the topic's walkthroughs.
    pub fn reference_video_url(&self) -> String {
        format!(
            "https://www.youtube.com/results?search_query={}",
            encode_query(&format!("{} algorithm", self.title))
        )
    }
}

const fn topic(slug: &'static str, title: &'static str, category: &'static str) -> AlgorithmTopic {
    AlgorithmTopic {
        slug,
        title,
        category,
    }
}

pub const TOPICS: &[AlgorithmTopic] = &[
    topic("binary-search", "Binary Search", "Searching"),
    topic("two-pointers", "Two Pointers", "Techniques"),
    topic("sliding-window", "Sliding Window", "Techniques"),
    topic("prefix-sums", "Prefix Sums", "Techniques"),
    topic("sorting", "Merge Sort and Quick Sort", "Sorting"),
    topic("bfs", "Breadth-First Search", "Graphs"),
    topic("dfs", "Depth-First Search", "Graphs"),
    topic("dijkstra", "Dijkstra's Shortest Path", "Graphs"),
    topic("topological-sort", "Topological Sort", "Graphs"),
    topic("union-find", "Union-Find", "Data Structures"),
    topic("minimum-spanning-tree", "Minimum Spanning Tree", "Graphs"),
    topic("segment-tree", "Segment Tree", "Data Structures"),
    topic("fenwick-tree", "Fenwick Tree", "Data Structures"),
    topic("dynamic-programming", "Dynamic Programming", "Dynamic Programming"),
    topic("knapsack", "0/1 Knapsack", "Dynamic Programming"),
    topic("lis", "Longest Increasing Subsequence", "Dynamic Programming"),
    topic("sieve", "Sieve of Eratosthenes", "Number Theory"),
    topic("modular-exponentiation", "Modular Exponentiation", "Number Theory"),
    topic("kmp", "Knuth-Morris-Pratt", "Strings"),
    topic("backtracking", "Backtracking", "Techniques"),
];

pub fn find_topic(slug: &str) -> Option<&'static AlgorithmTopic> {
    let slug = slug.trim();
    TOPICS.iter().find(|t| t.slug.eq_ignore_ascii_case(slug))
}

pub fn require_topic(slug: &str) -> Result<&'static AlgorithmTopic, AppError> {
    find_topic(slug).ok_or_else(|| AppError::UnknownTopic(slug.to_string()))
}

/// Percent-encodes a query string value, using `+` for spaces.
fn encode_query(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
