use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn create_main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Send", "send"),
            InlineKeyboardButton::callback("Receive", "receive"),
            InlineKeyboardButton::callback("History", "history"),
        ],
        vec![
            InlineKeyboardButton::callback("Portfolio", "portfolio"),
            InlineKeyboardButton::callback("ZeroAlpha", "alpha"),
            InlineKeyboardButton::callback("Settings", "settings"),
        ],
        vec![
            InlineKeyboardButton::callback("Help", "help"),
            InlineKeyboardButton::callback("🔄 Refresh", "refresh"),
        ],
    ])
}

pub fn create_alpha_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Daily Check-in", "alpha_checkin"),
            InlineKeyboardButton::callback("Leaderboard", "alpha_leaderboard"),
        ],
        vec![
            InlineKeyboardButton::callback("Bank Accounts", "alpha_accounts"),
            InlineKeyboardButton::callback("Sign Out", "alpha_logout"),
        ],
        vec![InlineKeyboardButton::callback("← Back to Menu", "menu")],
    ])
}

pub fn create_leaderboard_tier_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("All", "alpha_tier_all"),
            InlineKeyboardButton::callback("Bronze", "alpha_tier_bronze"),
            InlineKeyboardButton::callback("Silver", "alpha_tier_silver"),
        ],
        vec![
            InlineKeyboardButton::callback("Gold", "alpha_tier_gold"),
            InlineKeyboardButton::callback("Platinum", "alpha_tier_platinum"),
            InlineKeyboardButton::callback("← Back", "alpha"),
        ],
    ])
}

pub fn create_banking_keyboard(is_customer: bool, has_accounts: bool) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    if is_customer && !has_accounts {
        rows.push(vec![InlineKeyboardButton::callback(
            "Create Accounts",
            "alpha_create_accounts",
        )]);
    }

    if !is_customer {
        rows.push(vec![InlineKeyboardButton::callback(
            "Submit KYC",
            "alpha_kyc",
        )]);
    }

    rows.push(vec![InlineKeyboardButton::callback(
        "← Back to ZeroAlpha",
        "alpha",
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub fn create_settings_keyboard(theme: &str) -> InlineKeyboardMarkup {
    let theme_label = if theme == "light" {
        "🌙 Dark Mode"
    } else {
        "☀️ Light Mode"
    };

    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(theme_label, "toggle_theme"),
            InlineKeyboardButton::callback("Export Key", "export_key"),
        ],
        vec![InlineKeyboardButton::callback("← Back to Menu", "menu")],
    ])
}
