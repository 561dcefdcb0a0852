//! Built-in dataset used when storage holds no collections yet.

use crate::model::article::Article;
use crate::model::staff::StaffProfile;

pub fn seed_articles() -> Vec<Article> {
    vec![
        Article {
            id: "breach-2025-01".to_string(),
            title: "Major Database Breach: ACME Corp (Jan 2025)".to_string(),
            category: "Security Breaches".to_string(),
            excerpt: "Unauthorized access to customer records through exposed API key."
                .to_string(),
            content: "**Summary:** ACME Corp suffered a data breach after an expired token allowed unauthorized access.\n\n**Impact:** 2.1M records.\n\n**Mitigation:** Rotate keys, implement short TTLs, and monitor outgoing traffic.".to_string(),
            date: "2025-01-10".to_string(),
        },
        Article {
            id: "crime-2024-07".to_string(),
            title: "Organized Robbery Ring Dismantled".to_string(),
            category: "Real Life Crimes".to_string(),
            excerpt: "Investigation uncovered interstate coordination and money laundering."
                .to_string(),
            content: "Investigation revealed a 6-person ring operating across three states. Key evidence included surveillance logs and cryptocurrency traces.".to_string(),
            date: "2024-07-22".to_string(),
        },
        Article {
            id: "gang-101".to_string(),
            title: "Understanding the Street Gang Structure".to_string(),
            category: "Real Life Gangs".to_string(),
            excerpt: "Ranks, roles, and common behaviors: an educational overview.".to_string(),
            content: "This article covers common hierarchical structures found in many gangs and how law enforcement classifies ranks. Use for research and awareness.".to_string(),
            date: "2023-11-05".to_string(),
        },
    ]
}

pub fn seed_staff() -> Vec<StaffProfile> {
    vec![
        StaffProfile {
            id: "staff-1".to_string(),
            name: "Raven Steele".to_string(),
            role: "Editor-in-Chief".to_string(),
            avatar: "https://i.pravatar.cc/150?img=12".to_string(),
            banner: "https://picsum.photos/seed/raven/1200/300".to_string(),
            bio: "Leads investigations and longform journalism for Crime Network.".to_string(),
            contact: "raven@crimenet.local".to_string(),
        },
        StaffProfile {
            id: "staff-2".to_string(),
            name: "Kai Morales".to_string(),
            role: "Lead Security Researcher".to_string(),
            avatar: "https://i.pravatar.cc/150?img=24".to_string(),
            banner: "https://picsum.photos/seed/kai/1200/300".to_string(),
            bio: "Focus on vulnerability research and VPN privacy engineering.".to_string(),
            contact: "kai@crimenet.local".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_articles, seed_staff};
    use crate::model::Record;

    #[test]
    fn seed_records_are_valid() {
        for article in seed_articles() {
            article.validate().expect("seed article must validate");
        }
        for profile in seed_staff() {
            profile.validate().expect("seed staff must validate");
        }
    }
}
