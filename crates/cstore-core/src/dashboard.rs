//! Dashboard view model.
//!
//! [`render_dashboard`] is a pure function from catalog statistics and a
//! session snapshot to a serializable view. The CLI and HTTP layers render
//! the view; neither computes any of it.

use serde::Serialize;

use cstore_types::chat::{ChatMessage, ChatState};
use cstore_types::product::CatalogSummary;

use crate::chat::ChatSession;

const HERO_TITLE: &str = "🚀 편의점 득템 가이드";
const HERO_SUBTITLE: &str = "스마트한 소비를 위한 실시간 행사 압축 가이드! \
CU, GS25, 7-Eleven, Emart24의 모든 혜택을 한눈에 비교하세요.";

const CREDENTIAL_CONFIGURED_NOTICE: &str = "API Key 설정 완료!";
const CREDENTIAL_MISSING_NOTICE: &str = "Groq API Key가 있어야 챗봇 사용이 가능합니다.";
const FOOTER_CAPTION: &str = "© 2026 Convenience Store Dashboard";

const CHAT_TITLE: &str = "🤖 편의점 득템 도우미";
const CHAT_HINT: &str = "궁금한 행사 정보를 물어보세요! (예: 막걸리 안주 추천)";
const CHAT_PLACEHOLDER: &str = "메시지를 입력하세요...";

/// A quick-menu card on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickMenuCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

pub const QUICK_MENU: [QuickMenuCard; 6] = [
    QuickMenuCard {
        icon: "🔍",
        title: "전체 요약",
        description: "이미지 기반의 카드 리스트로 모든 행사 상품을 검색하고 필터링하세요.",
        route: "/overall_summary",
    },
    QuickMenuCard {
        icon: "📊",
        title: "브랜드별 비교",
        description: "어느 편의점이 가장 혜택이 좋을까요? 차트와 통계로 브랜드별 전략을 비교합니다.",
        route: "/brand_comparison",
    },
    QuickMenuCard {
        icon: "💎",
        title: "가성비 비교",
        description: "할인율이 가장 높은 TOP 50 상품만 모았습니다. 지갑을 지키는 가장 쉬운 방법!",
        route: "/best_value",
    },
    QuickMenuCard {
        icon: "🍱",
        title: "예산 맞춤 꿀조합",
        description: "내 예산 안에서 가장 많이 절약할 수 있는 상품들의 조합을 추천해드려요.",
        route: "/budget_combination",
    },
    QuickMenuCard {
        icon: "🏋️",
        title: "다이어트 가이드",
        description: "제로 슈거, 고단백 상품들만 쏙쏙 골라 건강한 편의점 식단을 제안합니다.",
        route: "/diet_guide",
    },
    QuickMenuCard {
        icon: "🌙",
        title: "야식 & 안주 가이드",
        description: "오늘 밤 혼술 안주와 야식을 고민하시나요? 딱 맞는 행사 안주를 찾아보세요.",
        route: "/night_snack_guide",
    },
];

/// A participating store brand and its logo asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandTile {
    pub name: &'static str,
    pub logo_path: &'static str,
}

pub const BRANDS: [BrandTile; 4] = [
    BrandTile {
        name: "CU",
        logo_path: "assets/logo_cu.png",
    },
    BrandTile {
        name: "GS25",
        logo_path: "assets/logo_gs25.png",
    },
    BrandTile {
        name: "7Eleven",
        logo_path: "assets/logo_7eleven.png",
    },
    BrandTile {
        name: "emart24",
        logo_path: "assets/logo_emart24.png",
    },
];

/// Snapshot of the session fields the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub credential_configured: bool,
    pub state: ChatState,
    pub messages: Vec<ChatMessage>,
    pub recent_keywords: Vec<String>,
}

impl From<&ChatSession> for SessionView {
    fn from(session: &ChatSession) -> Self {
        Self {
            credential_configured: session.has_credential(),
            state: session.state(),
            messages: session.messages().to_vec(),
            recent_keywords: session.recent_keywords().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSection {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarStats {
    pub available: bool,
    pub total_count: usize,
    pub brands_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    Configured,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub stats: SidebarStats,
    pub credential: CredentialStatus,
    pub credential_notice: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPanel {
    pub title: &'static str,
    pub hint: &'static str,
    pub placeholder: &'static str,
    pub state: ChatState,
    pub messages: Vec<ChatMessage>,
    pub recent_keywords: Vec<String>,
}

/// Everything needed to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub hero: HeroSection,
    pub quick_menu: Vec<QuickMenuCard>,
    pub brands: Vec<BrandTile>,
    pub sidebar: Sidebar,
    pub chat: ChatPanel,
}

pub fn render_dashboard(summary: Option<&CatalogSummary>, session: &SessionView) -> DashboardView {
    let stats = match summary {
        Some(s) => SidebarStats {
            available: true,
            total_count: s.total_count,
            brands_count: s.brands_count,
        },
        None => SidebarStats {
            available: false,
            total_count: 0,
            brands_count: 0,
        },
    };

    let (credential, credential_notice) = if session.credential_configured {
        (CredentialStatus::Configured, CREDENTIAL_CONFIGURED_NOTICE)
    } else {
        (CredentialStatus::Missing, CREDENTIAL_MISSING_NOTICE)
    };

    DashboardView {
        hero: HeroSection {
            title: HERO_TITLE,
            subtitle: HERO_SUBTITLE,
        },
        quick_menu: QUICK_MENU.to_vec(),
        brands: BRANDS.to_vec(),
        sidebar: Sidebar {
            stats,
            credential,
            credential_notice,
            caption: FOOTER_CAPTION,
        },
        chat: ChatPanel {
            title: CHAT_TITLE,
            hint: CHAT_HINT,
            placeholder: CHAT_PLACEHOLDER,
            state: session.state,
            messages: session.messages.clone(),
            recent_keywords: session.recent_keywords.clone(),
        },
    }
}

/// Format a count with comma thousands separators ("7123" -> "7,123").
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_summary_and_credential() {
        let mut session = ChatSession::new();
        session.set_credential("gsk_abc");
        let summary = CatalogSummary {
            total_count: 7123,
            brands_count: 4,
        };

        let view = render_dashboard(Some(&summary), &SessionView::from(&session));

        assert!(view.sidebar.stats.available);
        assert_eq!(view.sidebar.stats.total_count, 7123);
        assert_eq!(view.sidebar.credential, CredentialStatus::Configured);
        assert_eq!(view.sidebar.credential_notice, "API Key 설정 완료!");
        assert_eq!(view.quick_menu.len(), 6);
        assert_eq!(view.quick_menu[5].route, "/night_snack_guide");
        let brands: Vec<&str> = view.brands.iter().map(|b| b.name).collect();
        assert_eq!(brands, vec!["CU", "GS25", "7Eleven", "emart24"]);
        assert_eq!(view.chat.state, ChatState::Idle);
    }

    #[test]
    fn test_render_without_catalog_or_credential() {
        let session = ChatSession::new();

        let view = render_dashboard(None, &SessionView::from(&session));

        assert!(!view.sidebar.stats.available);
        assert_eq!(view.sidebar.credential, CredentialStatus::Missing);
        assert_eq!(
            view.sidebar.credential_notice,
            "Groq API Key가 있어야 챗봇 사용이 가능합니다."
        );
        assert_eq!(view.chat.state, ChatState::AwaitingCredential);
        assert!(view.chat.messages.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let session = SessionView::from(&ChatSession::new());
        let summary = CatalogSummary {
            total_count: 10,
            brands_count: 2,
        };
        assert_eq!(
            render_dashboard(Some(&summary), &session),
            render_dashboard(Some(&summary), &session)
        );
    }

    #[test]
    fn test_view_serializes_status_snake_case() {
        let view = render_dashboard(None, &SessionView::from(&ChatSession::new()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sidebar"]["credential"], "missing");
        assert_eq!(json["chat"]["state"], "awaiting_credential");
        assert_eq!(json["hero"]["title"], "🚀 편의점 득템 가이드");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(7123), "7,123");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
