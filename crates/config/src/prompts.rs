//! Spoken prompt and descriptor text
//!
//! Single source for every user-facing Vietnamese string the bridge speaks
//! or renders, so wording changes happen in one place.

use crate::profiles;
use comm_bridge_core::{ModeId, ProfileId};

/// Welcome prompt, spoken exactly once per session
pub const WELCOME: &str = "Xin chào! Chào mừng bạn đến với ứng dụng Cầu Nối Giao Tiếp. \
     Bạn có vấn đề gì về giao tiếp? Vui lòng nói rõ tình trạng của bạn.";

/// Apology spoken when the pair has no compatible conversion mode
pub const NO_COMPATIBLE_MODE: &str =
    "Xin lỗi, không tìm thấy phương thức giao tiếp phù hợp. Vui lòng thử lại.";

/// Placeholder spoken aloud when a sign-input mode has produced no text yet
pub const SIGN_INPUT_PLACEHOLDER: &str = "Xin chào, tôi đang sử dụng ngôn ngữ ký hiệu";

/// Stand-in wording for sign-sourced audio when no text is available
pub const SIGN_SOURCE_FALLBACK: &str = "Từ ngôn ngữ ký hiệu";

/// Announcement after the first participant's profile is detected
pub fn detected_person1(profile: ProfileId) -> String {
    format!(
        "Đã nhận diện: {}. Bây giờ, người thứ hai vui lòng nói về tình trạng của mình.",
        profiles::label(profile)
    )
}

/// Announcement after the second participant's profile is detected
pub fn detected_person2(profile: ProfileId) -> String {
    format!(
        "Đã nhận diện: {}. Hệ thống đang tự động kết nối cho hai bạn.",
        profiles::label(profile)
    )
}

/// Readiness announcement once a mode has been selected
pub fn ready_with_mode(mode: ModeId) -> String {
    format!(
        "Đã sẵn sàng. Chế độ: {}. Hệ thống sẽ tự động bắt đầu các tính năng cần thiết.",
        mode.display_label()
    )
}

/// Descriptor wrapping text that is being played as audio
pub fn audio_announcement(text: &str) -> String {
    let spoken = if text.is_empty() {
        SIGN_SOURCE_FALLBACK
    } else {
        text
    };
    format!("Đang phát âm thanh: \"{spoken}\"")
}

/// Descriptor for text that needs a sign-language rendering
pub fn sign_rendering(text: &str) -> String {
    format!("Chuyển đổi sang ngôn ngữ ký hiệu: {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_announcements_carry_label() {
        let text = detected_person1(ProfileId::Blind);
        assert!(text.contains("Người mù"));
        let text = detected_person2(ProfileId::Deaf);
        assert!(text.contains("Người điếc"));
    }

    #[test]
    fn test_ready_announcement_carries_mode_label() {
        let text = ready_with_mode(ModeId::AudioText);
        assert!(text.contains("Âm thanh → Văn bản"));
    }

    #[test]
    fn test_audio_announcement_fallback() {
        assert!(audio_announcement("").contains(SIGN_SOURCE_FALLBACK));
        assert!(audio_announcement("xin chào").contains("xin chào"));
    }
}
