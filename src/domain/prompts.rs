//! Prompt templates for AI content generation
//!
//! Pure functions mapping a meeting description to the user prompt and the
//! persona system instruction for each generation kind. Missing optional
//! fields render as "待定"-style defaults so a sparse form still produces a
//! usable prompt.

use crate::domain::models::{GenerationKind, MeetingDescription};

/// Fallback speech length in minutes, applied regardless of meeting length
const MIN_SPEECH_MINUTES: u32 = 5;

/// Prompt builders for the four generation kinds
pub struct PromptTemplates;

impl PromptTemplates {
    /// Build the user prompt for the given kind. Deterministic.
    pub fn build_prompt(kind: GenerationKind, data: &MeetingDescription) -> String {
        match kind {
            GenerationKind::Agenda => Self::agenda(data),
            GenerationKind::Speech => Self::speech(data),
            GenerationKind::Poster => Self::poster(data),
            GenerationKind::Gifts => Self::gifts(data),
        }
    }

    /// Persona system instruction for the given kind
    pub fn system_instruction(kind: GenerationKind) -> &'static str {
        match kind {
            GenerationKind::Agenda => "你是一位专业的会议策划专家，擅长制定详细、合理的会议议程。",
            GenerationKind::Speech => "你是一位专业的演讲稿撰写专家，擅长撰写富有感染力的会议演讲稿。",
            GenerationKind::Poster => "你是一位专业的平面设计师，擅长会议海报设计。",
            GenerationKind::Gifts => "你是一位专业的会议策划顾问，擅长为各类会议推荐合适的伴手礼。",
        }
    }

    /// Approximate speech length in minutes derived from the meeting
    /// duration. Monotonic in the duration with a floor of
    /// [`MIN_SPEECH_MINUTES`]; unparsable or missing durations count as a
    /// four-hour meeting.
    pub fn speech_minutes(duration_hours: Option<&str>) -> u32 {
        let hours = duration_hours
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|h| *h > 0.0)
            .unwrap_or(4.0);
        ((hours / 8.0).floor() as u32).max(MIN_SPEECH_MINUTES)
    }

    fn agenda(data: &MeetingDescription) -> String {
        format!(
            "你是一位专业的会议策划专家。请根据以下会议信息，生成一份详细的会议议程。\n\n\
             会议信息：\n\
             - 主题：{title}\n\
             - 日期：{date}\n\
             - 地点：{location}\n\
             - 参会人数：{attendees}人\n\
             - 会议时长：{duration}小时\n\
             - 会议类型：{meeting_type}\n\
             - 会议描述：{description}\n\n\
             要求：\n\
             1. 议程要包含时间节点、内容描述、负责人\n\
             2. 合理分配时间，包含开场、主体内容、互动、总结环节\n\
             3. 考虑茶歇和用餐时间\n\
             4. 以清晰的格式输出，使用emoji图标增强可读性\n\n\
             请直接输出议程内容，不要添加额外的解释说明。",
            title = data.title,
            date = data.date.as_deref().unwrap_or("待定"),
            location = data.location.as_deref().unwrap_or("待定"),
            attendees = data.attendees.as_deref().unwrap_or("待定"),
            duration = data.duration_hours.as_deref().unwrap_or("4"),
            meeting_type = data.meeting_type.as_deref().unwrap_or("通用会议"),
            description = data.description.as_deref().unwrap_or("无"),
        )
    }

    fn speech(data: &MeetingDescription) -> String {
        let meeting_type = data.meeting_type.as_deref().unwrap_or("通用会议");
        format!(
            "你是一位专业的演讲稿撰写专家。请根据以下会议信息，撰写一份专业的开幕演讲稿。\n\n\
             会议信息：\n\
             - 主题：{title}\n\
             - 日期：{date}\n\
             - 地点：{location}\n\
             - 参会人数：{attendees}人\n\
             - 会议类型：{meeting_type}\n\
             - 会议描述：{description}\n\n\
             要求：\n\
             1. 演讲稿时长约{minutes}分钟\n\
             2. 包含：欢迎致辞、会议背景、核心内容、期望成果、感谢致辞\n\
             3. 语言要正式而富有感染力\n\
             4. 适合{meeting_type}类型的会议风格\n\n\
             请直接输出演讲稿内容，不要添加额外的解释说明。",
            title = data.title,
            date = data.date.as_deref().unwrap_or("待定"),
            location = data.location.as_deref().unwrap_or("待定"),
            attendees = data.attendees.as_deref().unwrap_or("待定"),
            meeting_type = meeting_type,
            description = data.description.as_deref().unwrap_or("无"),
            minutes = Self::speech_minutes(data.duration_hours.as_deref()),
        )
    }

    fn poster(data: &MeetingDescription) -> String {
        format!(
            "你是一位专业的平面设计师。请根据以下会议信息，提供海报设计方案。\n\n\
             会议信息：\n\
             - 主题：{title}\n\
             - 日期：{date}\n\
             - 地点：{location}\n\
             - 会议类型：{meeting_type}\n\n\
             要求：\n\
             1. 设计风格建议（现代/商务/创意等）\n\
             2. 主色调和配色方案\n\
             3. 核心视觉元素\n\
             4. 布局建议\n\
             5. 文字排版建议\n\
             6. 尺寸和用途建议\n\n\
             请以结构化的方式输出设计方案。",
            title = data.title,
            date = data.date.as_deref().unwrap_or("待定"),
            location = data.location.as_deref().unwrap_or("待定"),
            meeting_type = data.meeting_type.as_deref().unwrap_or("通用会议"),
        )
    }

    fn gifts(data: &MeetingDescription) -> String {
        format!(
            "你是一位专业的会议策划顾问。请根据以下会议信息，推荐合适的伴手礼方案。\n\n\
             会议信息：\n\
             - 主题：{title}\n\
             - 参会人数：{attendees}人\n\
             - 预算范围：{budget}\n\
             - 会议类型：{meeting_type}\n\n\
             要求：\n\
             1. 推荐3-5个不同档次的伴手礼方案\n\
             2. 每个方案包含：名称、单价、特点、适用场景\n\
             3. 计算总成本预算\n\
             4. 提供采购建议\n\
             5. 考虑环保和实用性\n\n\
             请以结构化的方式输出推荐方案。",
            title = data.title,
            attendees = data.attendees.as_deref().unwrap_or("100"),
            budget = data.budget.as_deref().unwrap_or("中等"),
            meeting_type = data.meeting_type.as_deref().unwrap_or("通用会议"),
        )
    }
}
