//! Fixed catalogs of filter options and the short labels shown on cards.

/// A selectable filter option: the value stored in project data and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub id: &'static str,
    pub label: &'static str,
}

const fn option(id: &'static str, label: &'static str) -> FilterOption {
    FilterOption { id, label }
}

/// Sentinel id meaning "no filter".
pub const ALL: &str = "all";

pub const PLATFORMS: &[FilterOption] = &[
    option(ALL, "全部平台"),
    option("小红书", "小红书"),
    option("抖音", "抖音"),
    option("微信视频号", "微信视频号"),
    option("哔哩哔哩", "B站"),
    option("快手", "快手"),
    option("微信公众号", "微信公众号"),
    option("知乎", "知乎"),
    option("闲鱼", "闲鱼"),
    option("淘宝", "淘宝"),
    option("拼多多", "拼多多"),
    option("X", "X"),
    option("YouTube", "YouTube"),
    option("TikTok", "TikTok"),
    option("Reddit", "Reddit"),
    option("Instagram", "Instagram"),
    option("Google", "Google"),
    option("亚马逊", "亚马逊"),
    option("独立站", "独立站"),
    option("Telegram", "Telegram"),
];

pub const PROFIT_MODELS: &[FilterOption] = &[
    option(ALL, "全部"),
    option("电商带货", "电商带货"),
    option("自营电商", "自营电商"),
    option("虚拟产品销售", "虚拟产品销售"),
    option("订阅制", "订阅制"),
    option("创作者分成", "创作者分成"),
    option("广告投放", "广告投放"),
    option("拉新推广", "拉新推广"),
    option("接广商单", "接广商单"),
    option("代找", "代找"),
    option("咨询服务", "咨询服务"),
    option("定制服务", "定制服务"),
    option("社群", "社群"),
    option("引流", "引流"),
    option("淘客", "淘客"),
];

pub const QUICK_TAGS: &[FilterOption] = &[
    option("hot", "热门项目"),
    option("new", "本周新增"),
    option("high-revenue", "高收益案例"),
    option("low-cost", "低门槛"),
];

/// Label for a platform or profit-model id, falling back to the id itself.
pub fn option_label<'a>(options: &[FilterOption], id: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.label)
        .unwrap_or(id)
}

/// Shortened platform name for compact cards.
pub fn display_platform(platform: &str) -> &str {
    match platform {
        "微信视频号" => "视频号",
        "哔哩哔哩" => "B站",
        "微信公众号" => "公众号",
        "独立站" => "网站",
        other => other,
    }
}

/// Collapse a profit model into the short type label shown on cards.
pub fn project_type_label(profit_model: &str) -> &'static str {
    match profit_model {
        "电商带货" | "电商卖货" => "电商",
        "创作者分成" | "内容创作" => "创作",
        "定制服务" | "咨询服务" | "接广商单" => "服务",
        "拉新推广" | "推广返佣" | "CPA推广" => "推广",
        "引流" | "引流变现" => "引流",
        "虚拟产品销售" | "虚拟产品" | "知识付费" => "虚拟产品",
        "订阅制" | "会员订阅" | "付费订阅" => "订阅",
        _ => "项目",
    }
}
