//! 题号差距分析服务 - 业务能力层
//!
//! 对比题库存储与源文本两侧的题号集合，找出空缺、重复与差集。
//! 纯只读：不改动题库，也不改动源文本。

use crate::models::question::QuestionBank;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::info;

/// 差距分析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    /// 题库侧题号（升序）
    pub store_numbers: Vec<u32>,
    /// 期望连续范围 [1, max] 内题库缺失的题号（升序）
    pub missing_from_store: Vec<u32>,
    /// 源文本侧题号（升序，含重复）
    pub source_numbers: Vec<u32>,
    /// 源文本中作为行首标记出现多次的题号（升序）
    pub source_duplicates: Vec<u32>,
    /// 源文本有而题库没有的题号（升序）
    pub in_source_not_store: Vec<u32>,
    /// 题库有而源文本没有的题号（升序）
    pub in_store_not_source: Vec<u32>,
}

impl GapReport {
    /// 待提取题号：题库空缺与"源文本独有"两个列表的去重并集（升序）
    pub fn numbers_to_extract(&self) -> Vec<u32> {
        let mut merged: BTreeSet<u32> = self.missing_from_store.iter().copied().collect();
        merged.extend(self.in_source_not_store.iter().copied());
        merged.into_iter().collect()
    }
}

/// 题号差距分析服务
pub struct GapAnalyzer {
    /// 行首题号标记（多行模式）
    marker: Regex,
}

impl GapAnalyzer {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"(?m)^(\d+)\.\s+").expect("题号标记正则应当合法"),
        }
    }

    /// 分析题库与源文本的题号差距
    ///
    /// # 参数
    /// - `bank`: 题库存储
    /// - `source`: 完整源文本
    ///
    /// # 返回
    /// 差距报告；源文本无任何标记时各列表为空，不报错
    pub fn analyze(&self, bank: &QuestionBank, source: &str) -> GapReport {
        let mut store_numbers = bank.question_numbers();
        store_numbers.sort_unstable();

        let store_set: BTreeSet<u32> = store_numbers.iter().copied().collect();

        // 题库侧空缺：期望范围 [1, max] 与现有题号的差集
        let missing_from_store: Vec<u32> = match store_numbers.last() {
            Some(&max) => (1..=max).filter(|n| !store_set.contains(n)).collect(),
            None => Vec::new(),
        };

        // 源文本侧：逐行扫描行首题号标记
        let mut source_numbers: Vec<u32> = self
            .marker
            .captures_iter(source)
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .collect();
        source_numbers.sort_unstable();

        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for &number in &source_numbers {
            if !seen.insert(number) {
                duplicates.insert(number);
            }
        }

        let in_source_not_store: Vec<u32> = seen.difference(&store_set).copied().collect();
        let in_store_not_source: Vec<u32> = store_set.difference(&seen).copied().collect();

        GapReport {
            store_numbers,
            missing_from_store,
            source_numbers,
            source_duplicates: duplicates.into_iter().collect(),
            in_source_not_store,
            in_store_not_source,
        }
    }

    /// 输出差距分析日志
    pub fn log_report(&self, report: &GapReport) {
        info!("{}", "=".repeat(60));
        info!("📊 题号差距分析");
        info!("{}", "=".repeat(60));
        info!("题库题目数: {}", report.store_numbers.len());
        if let (Some(min), Some(max)) = (report.store_numbers.first(), report.store_numbers.last())
        {
            info!("题库题号范围: {} - {}", min, max);
        }

        if report.missing_from_store.is_empty() {
            info!("✅ 题库编号无空缺");
        } else {
            info!("⚠️ 题库缺失题号: {:?}", report.missing_from_store);
        }

        info!("源文本题号条目: {}", report.source_numbers.len());
        if !report.source_duplicates.is_empty() {
            info!("⚠️ 源文本重复题号: {:?}", report.source_duplicates);
        }
        if !report.in_source_not_store.is_empty() {
            info!("源文本独有题号: {:?}", report.in_source_not_store);
        }
        if !report.in_store_not_source.is_empty() {
            info!("题库独有题号: {:?}", report.in_store_not_source);
        }
        info!("{}", "=".repeat(60));
    }
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
