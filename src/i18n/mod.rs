//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use rat_embed_lang::register_translations;
use std::collections::HashMap;

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    fn entry(translations: &mut HashMap<String, HashMap<String, String>>, key: &str, zh: &str, en: &str, ja: &str) {
        let mut messages = HashMap::new();
        messages.insert("zh-CN".to_string(), zh.to_string());
        messages.insert("en-US".to_string(), en.to_string());
        messages.insert("ja-JP".to_string(), ja.to_string());
        translations.insert(key.to_string(), messages);
    }

    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 投影配置
        Self::entry(
            &mut translations,
            "error.config_attribute_name",
            "投影配置第{index}项缺少属性名",
            "Projection config entry {index} has no attribute name",
            "射影設定の{index}番目の項目に属性名がありません",
        );
        Self::entry(
            &mut translations,
            "error.config_json",
            "投影配置JSON无效: {message}",
            "Invalid projection config JSON: {message}",
            "射影設定のJSONが無効です: {message}",
        );
        Self::entry(
            &mut translations,
            "error.config_file",
            "配置文件解析失败: {message}",
            "Failed to parse config file: {message}",
            "設定ファイルの解析に失敗しました: {message}",
        );

        // 几何
        Self::entry(
            &mut translations,
            "error.wkt_empty",
            "WKT为空，无法对元数据卡片执行KML转换",
            "WKT is empty, cannot run the KML conversion for the metacard",
            "WKTが空のため、メタカードのKML変換を実行できません",
        );
        Self::entry(
            &mut translations,
            "error.wkt_parse",
            "无法将WKT解析为几何: {message}",
            "Unable to parse WKT into a geometry: {message}",
            "WKTをジオメトリとして解析できません: {message}",
        );
        Self::entry(
            &mut translations,
            "error.location_missing",
            "元数据卡片 '{id}' 没有位置信息，无法生成KML地标",
            "Metacard '{id}' has no location, cannot build a KML placemark",
            "メタカード '{id}' に位置情報がないため、KMLプレースマークを生成できません",
        );

        // 属性JSON
        Self::entry(
            &mut translations,
            "error.properties_missing",
            "无法将JSON解析为属性映射",
            "Unable to parse JSON into a properties map",
            "JSONをプロパティマップとして解析できません",
        );

        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    pub fn init() {
        Self::register_all_translations();

        // 从环境变量获取语言设置，默认为zh-CN
        let lang = std::env::var("RAT_LANG")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_else(|_| "zh-CN".to_string());

        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}

/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{current_language, set_language, t, tf};
