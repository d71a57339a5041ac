//! Static emoji data grouped into the picker's categories.

/// A named group of emoji shown as one section of the picker.
#[derive(Debug, Clone, Copy)]
pub struct EmojiCategory {
    /// Section header shown above the group.
    pub name: &'static str,
    /// Emoji in presentation order.
    pub emoji: &'static [&'static str],
}

/// All picker categories in display order.
pub const CATEGORIES: &[EmojiCategory] = &[
    EmojiCategory {
        name: "Smileys & People",
        emoji: &[
            "😀", "😃", "😄", "😁", "😆", "😅", "😂", "🙂", "😉", "😊", "😍", "😘", "😜", "🤔",
            "😐", "😴", "😭", "😡", "👍", "👎", "👏", "🙌", "🤝", "💪",
        ],
    },
    EmojiCategory {
        name: "Animals & Nature",
        emoji: &[
            "🐶", "🐱", "🐭", "🐰", "🦊", "🐻", "🐼", "🐸", "🐵", "🦉", "🐢", "🐙", "🌲", "🌵",
            "🍀", "🌸",
        ],
    },
    EmojiCategory {
        name: "Food & Drink",
        emoji: &[
            "🍏", "🍕", "🍔", "🍟", "🌮", "🍣", "🍩", "🎂", "🍿", "☕", "🍺", "🍷",
        ],
    },
    EmojiCategory {
        name: "Activity",
        emoji: &["⚽", "🏀", "🎾", "🎳", "🎮", "🎲", "🎸", "🎤", "🏆", "🎯"],
    },
    EmojiCategory {
        name: "Travel & Places",
        emoji: &["🚗", "🚕", "🚲", "✈️", "🚀", "🚂", "🏠", "🏔️", "🏖️", "🗽"],
    },
    EmojiCategory {
        name: "Objects",
        emoji: &["⌚", "📱", "💻", "⌨️", "🖥️", "🔦", "🔑", "📎", "✂️", "📚", "🔨", "💡"],
    },
    EmojiCategory {
        name: "Symbols",
        emoji: &["❤️", "💔", "✨", "⭐", "🔥", "💯", "✅", "❌", "⚠️", "❓", "❗", "♻️"],
    },
    EmojiCategory {
        name: "Flags",
        emoji: &["🏁", "🚩", "🏳️", "🏴", "🏳️‍🌈", "🇪🇺", "🇺🇳"],
    },
];
