use crate::error::ScoreError;
use crate::models::{Item, Receipt};
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::str::FromStr;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// 积分规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescription,
    OddPurchaseDay,
    AfternoonPurchase,
}

/// 单条规则的得分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

/// 得分明细，按规则顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub total: u64,
    pub contributions: Vec<RuleContribution>,
}

impl ScoreBreakdown {
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

/// 计算小票积分
pub fn score(receipt: &Receipt) -> Result<u64, ScoreError> {
    score_breakdown(receipt).map(|b| b.total)
}

/// 计算小票积分并返回每条规则的贡献
///
/// 日期或时间无法解析时整张小票失败，不返回部分积分。
pub fn score_breakdown(receipt: &Receipt) -> Result<ScoreBreakdown, ScoreError> {
    let purchase_date = parse_purchase_date(&receipt.purchase_date)?;
    let purchase_time = parse_purchase_time(&receipt.purchase_time)?;
    let total = parse_amount(&receipt.total);

    let contributions = vec![
        RuleContribution {
            rule: Rule::RetailerName,
            points: retailer_points(&receipt.retailer),
        },
        RuleContribution {
            rule: Rule::RoundDollarTotal,
            points: if receipt.total.ends_with(".00") { ROUND_DOLLAR_POINTS } else { 0 },
        },
        RuleContribution {
            rule: Rule::QuarterMultipleTotal,
            points: if is_quarter_multiple(&total) { QUARTER_MULTIPLE_POINTS } else { 0 },
        },
        RuleContribution {
            rule: Rule::ItemPairs,
            points: (receipt.items.len() as u64 / 2) * ITEM_PAIR_POINTS,
        },
        RuleContribution {
            rule: Rule::ItemDescription,
            points: receipt
                .items
                .iter()
                .map(item_description_points)
                .fold(0u64, u64::saturating_add),
        },
        RuleContribution {
            rule: Rule::OddPurchaseDay,
            points: if purchase_date.day() % 2 == 1 { ODD_DAY_POINTS } else { 0 },
        },
        RuleContribution {
            rule: Rule::AfternoonPurchase,
            points: if in_afternoon_window(purchase_time) { AFTERNOON_POINTS } else { 0 },
        },
    ];

    let total = contributions
        .iter()
        .map(|c| c.points)
        .fold(0u64, u64::saturating_add);

    Ok(ScoreBreakdown {
        total,
        contributions,
    })
}

/// 宽松金额解析：读取最长的 `[+-]数字[.数字]` 前缀，无数字时按 0 处理
///
/// 不报错是有意保留的兼容行为，`"abc"`、`""` 都解析为 0，`"12.5x"` 解析为 12.5。
/// 不识别科学计数法，遇到 `e` 即停止。
pub fn parse_amount(text: &str) -> BigDecimal {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let sign_len = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let int_len = leading_digits(&bytes[sign_len..]);
    let int_end = sign_len + int_len;

    let frac_len = if bytes.get(int_end) == Some(&b'.') {
        leading_digits(&bytes[int_end + 1..])
    } else {
        0
    };

    if int_len + frac_len == 0 {
        return BigDecimal::zero();
    }

    let sign = if bytes.first() == Some(&b'-') { "-" } else { "" };
    let int_part = match &s[sign_len..int_end] {
        "" => "0",
        digits => digits,
    };
    let frac_part = match frac_len {
        0 => "0",
        n => &s[int_end + 1..int_end + 1 + n],
    };

    BigDecimal::from_str(&format!("{}{}.{}", sign, int_part, frac_part))
        .unwrap_or_else(|_| BigDecimal::zero())
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

fn is_quarter_multiple(total: &BigDecimal) -> bool {
    let quarters = total.clone() * BigDecimal::from(4);
    quarters == quarters.with_scale(0)
}

fn item_description_points(item: &Item) -> u64 {
    if item.short_description.trim().chars().count() % 3 != 0 {
        return 0;
    }
    let fifth = parse_amount(&item.price) / BigDecimal::from(5);
    ceil_points(&fifth)
}

/// 向上取整；负数按 0 计
fn ceil_points(value: &BigDecimal) -> u64 {
    let truncated = value.with_scale(0);
    let ceiled = if *value > truncated {
        truncated + BigDecimal::from(1)
    } else {
        truncated
    };

    if ceiled <= BigDecimal::zero() {
        0
    } else {
        ceiled.to_u64().unwrap_or(u64::MAX)
    }
}

fn in_afternoon_window(time: NaiveTime) -> bool {
    let after = NaiveTime::from_hms_opt(14, 0, 0);
    let before = NaiveTime::from_hms_opt(16, 0, 0);
    matches!((after, before), (Some(a), Some(b)) if time > a && time < b)
}

fn parse_purchase_date(text: &str) -> Result<NaiveDate, ScoreError> {
    let invalid = || ScoreError::InvalidDate(text.to_string());
    if !matches_shape(text, "dddd-dd-dd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_purchase_time(text: &str) -> Result<NaiveTime, ScoreError> {
    let invalid = || ScoreError::InvalidTime(text.to_string());
    if !matches_shape(text, "dd:dd") {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| invalid())
}

/// `d` 匹配 ASCII 数字，其它字符按字面匹配
fn matches_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            literal => c == literal,
        })
}
