use chrono::Local;
use dioxus::prelude::*;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardHeader, Modal, PageHeader, PageTitle};
use uuid::Uuid;

const GREETING: &str =
    "Hello! I'm your AI assistant for crime data analysis. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
struct ChatMessage {
    id: Uuid,
    text: String,
    sender: Sender,
    time: String,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            time: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// Append the draft as a user message. Blank drafts are ignored.
fn post_draft(messages: &mut Vec<ChatMessage>, draft: &str) -> bool {
    let text = draft.trim();
    if text.is_empty() {
        return false;
    }
    messages.push(ChatMessage::new(Sender::User, text));
    true
}

const FEATURES: [(&str, &str, [&str; 4]); 3] = [
    (
        "Data Analysis",
        "Get insights from your crime data",
        [
            "Crime pattern recognition",
            "Trend analysis and forecasting",
            "Statistical correlations",
            "Custom data queries",
        ],
    ),
    (
        "Report Generation",
        "Automated intelligent reports",
        [
            "Executive summaries",
            "Detailed analytics reports",
            "Comparative analysis",
            "Export to multiple formats",
        ],
    ),
    (
        "Predictive Insights",
        "AI-powered predictions",
        [
            "Crime hotspot prediction",
            "Risk assessment models",
            "Resource allocation suggestions",
            "Early warning systems",
        ],
    ),
];

/// Chat page. Conversation stays local; sending prompts for an upgrade.
#[component]
pub fn Chat() -> Element {
    let mut messages = use_signal(|| vec![ChatMessage::new(Sender::Bot, GREETING)]);
    let mut draft = use_signal(String::new);
    let mut show_upgrade = use_signal(|| false);

    let mut send = move || {
        if post_draft(&mut messages.write(), &draft()) {
            tracing::debug!("Chat message held for upgrade");
            draft.set(String::new());
            show_upgrade.set(true);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./chat.css") }

        div { class: "page",
            PageHeader {
                PageTitle { subtitle: "Powered by Advanced AI".to_string(), "AI Chat Assistant" }
            }

            Card { class: "chat-panel",
                CardHeader { title: "Crime Data AI", subtitle: "AI Assistant • Online".to_string() }
                div { class: "chat-messages",
                    for message in messages() {
                        div {
                            key: "{message.id}",
                            class: if message.sender == Sender::User { "chat-bubble chat-bubble-user" } else { "chat-bubble chat-bubble-bot" },
                            p { "{message.text}" }
                            span { class: "chat-time", "{message.time}" }
                        }
                    }
                }
                div { class: "chat-input",
                    textarea {
                        rows: 2,
                        placeholder: "Ask about crime statistics, trends, or data insights...",
                        value: draft(),
                        oninput: move |e: FormEvent| draft.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Enter && !e.modifiers().contains(Modifiers::SHIFT) {
                                e.prevent_default();
                                send();
                            }
                        },
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: draft().trim().is_empty(),
                        onclick: move |_| send(),
                        "Send"
                    }
                }
            }

            div { class: "chat-features",
                for (title, subtitle, points) in FEATURES {
                    Card { key: "{title}",
                        CardHeader { title: title, subtitle: subtitle.to_string() }
                        CardContent {
                            ul { class: "chat-feature-list",
                                for point in points {
                                    li { key: "{point}", "{point}" }
                                }
                            }
                        }
                    }
                }
            }

            Modal {
                open: show_upgrade(),
                title: "Premium Feature",
                on_close: move |_| show_upgrade.set(false),
                footer: rsx! {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| show_upgrade.set(false),
                        "Maybe Later"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            tracing::info!("Upgrade requested");
                            show_upgrade.set(false);
                        },
                        "Upgrade Now"
                    }
                },
                div { class: "chat-upgrade",
                    h3 { "Unlock AI Chat Assistant" }
                    p { class: "muted",
                        "Get access to advanced AI-powered crime data analysis, intelligent insights, and automated reporting."
                    }
                    ul { class: "chat-feature-list",
                        li { "Unlimited AI conversations" }
                        li { "Advanced data analysis" }
                        li { "Automated report generation" }
                        li { "Predictive insights" }
                    }
                }
            }
        }
    }
}
