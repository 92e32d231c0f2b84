//! Canned question/answer table
//!
//! Keys are canonical questions: trimmed and lowercased.

use crate::error::AdvisorError;
use crate::Result;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const ETF_DEFINITION: &str = "An ETF (Exchange-Traded Fund) is an investment fund that trades on stock exchanges, much like stocks. ETFs hold assets such as stocks, bonds, or commodities, and trade at market-determined prices. They typically have higher daily liquidity and lower fees than mutual funds, making them attractive for individual investors.";

/// Embedded answer table
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("what is an etf", ETF_DEFINITION),
    ("what exactly is an etf", ETF_DEFINITION),
    (
        "how do etfs work",
        "ETFs work by pooling money from many investors to buy a diversified portfolio of assets. When you buy shares of an ETF, you're buying a small portion of the entire portfolio. ETFs trade throughout the day like stocks, with prices that fluctuate based on supply and demand. Most ETFs are designed to track an index, sector, commodity, or other asset but can be bought and sold like a common stock.",
    ),
    (
        "what are the benefits of etfs",
        "ETFs offer several advantages: 1) Diversification - instant exposure to many stocks or bonds, 2) Low costs - typically lower expense ratios than mutual funds, 3) Tax efficiency - generally trigger fewer capital gains, 4) Liquidity - can be bought and sold throughout the trading day, 5) Transparency - holdings are disclosed daily, and 6) Flexibility - can be used for various investment strategies including long-term investing.",
    ),
    (
        "what's the difference between etfs and mutual funds",
        "The main differences between ETFs and mutual funds are: 1) Trading - ETFs trade like stocks throughout the day while mutual funds trade once per day after market close, 2) Fees - ETFs typically have lower expense ratios, 3) Tax efficiency - ETFs are usually more tax-efficient, 4) Minimum investment - ETFs have no minimums beyond the share price, while mutual funds often require minimum investments, and 5) Management style - most ETFs are passively managed while mutual funds are often actively managed.",
    ),
    (
        "what are index etfs",
        "Index ETFs are exchange-traded funds designed to track a specific market index, such as the S&P 500 or NASDAQ. They aim to replicate the performance of their target index by holding all (or a representative sample) of the securities in the index. Index ETFs offer low-cost diversification and typically have lower expense ratios than actively managed funds because they simply follow an index rather than paying managers to select investments.",
    ),
    (
        "what are the risks of etfs",
        "The main risks of ETFs include: 1) Market risk - ETF prices fluctuate with their underlying assets, 2) Tracking error risk - some ETFs may not perfectly match their benchmark index, 3) Liquidity risk - some specialized ETFs may have lower trading volumes, 4) Concentration risk - sector or country-specific ETFs lack broad diversification, 5) Currency risk - international ETFs may be affected by exchange rate fluctuations, and 6) Trading costs - frequent buying and selling can add costs through bid-ask spreads and commissions.",
    ),
    (
        "how do i buy an etf",
        "You can buy ETFs through most brokerage accounts, including traditional brokers and online platforms. The process is similar to buying stocks: 1) Open a brokerage account if you don't have one, 2) Fund your account, 3) Research ETFs that match your investment goals, 4) Place an order using the ETF's ticker symbol, and 5) Specify the number of shares or amount you wish to invest. ETFs trade at market prices throughout the trading day, so you can buy them whenever the market is open.",
    ),
    (
        "what is an expense ratio",
        "An expense ratio is the annual fee that ETFs and mutual funds charge shareholders for managing the fund. It's expressed as a percentage of the fund's average net assets. For example, an expense ratio of 0.5% means that for every $1,000 invested, you pay $5 annually in fees. ETFs typically have lower expense ratios than mutual funds, especially passive index ETFs. The expense ratio is important because higher fees directly reduce your investment returns over time.",
    ),
    (
        "how are etfs taxed",
        "ETFs are generally more tax-efficient than mutual funds. When you hold ETFs: 1) Dividends and capital gain distributions are taxable in the year they're received, 2) When you sell ETF shares at a profit, you'll owe capital gains tax based on how long you held them (short-term or long-term rates), 3) ETFs typically generate fewer capital gain distributions than mutual funds due to their unique creation/redemption process, making them more tax-efficient for long-term investors. Tax laws vary by country, so consult a tax professional for specific advice.",
    ),
    (
        "what is the difference between active and passive etfs",
        "Passive ETFs aim to track a specific index or benchmark, while active ETFs have portfolio managers who make investment decisions to try to outperform the market. Key differences: 1) Management style - passive ETFs follow a rules-based approach while active ETFs rely on manager expertise, 2) Expense ratios - passive ETFs typically have lower fees than active ETFs, 3) Trading activity - active ETFs generally have higher turnover, 4) Performance goals - passive ETFs seek to match their benchmark's performance, while active ETFs aim to exceed it, and 5) Transparency - passive ETFs disclose holdings daily, while some active ETFs may disclose less frequently.",
    ),
    (
        "what are the different types of etfs",
        "The main types of ETFs include: 1) Stock (equity) ETFs - track stock indices, sectors, or investment strategies, 2) Bond (fixed income) ETFs - invest in government, corporate, or municipal bonds, 3) Commodity ETFs - track physical commodities like gold or oil, 4) Currency ETFs - track currency values or baskets of currencies, 5) Specialty ETFs - focus on specific themes like ESG (Environmental, Social, Governance), 6) Inverse ETFs - aim to profit from market declines, 7) Leveraged ETFs - use financial derivatives to amplify returns, and 8) International ETFs - focus on global or country-specific markets outside your home country.",
    ),
    (
        "are etfs good for beginners",
        "Yes, ETFs can be excellent investment vehicles for beginners for several reasons: 1) Instant diversification - a single ETF can give you exposure to hundreds of securities, reducing risk, 2) Low minimum investment - you can start with just the price of one share, 3) Simplicity - index ETFs are straightforward to understand compared to selecting individual stocks, 4) Low costs - many ETFs have very low expense ratios, 5) Liquidity - easy to buy and sell when needed, and 6) Variety - you can start with broad market ETFs and gradually add more specific ones as you learn. For beginners, broad-based index ETFs are often recommended as a core investment.",
    ),
];

/// Prompts offered to users who don't know what to ask
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What exactly is an ETF?",
    "How do ETFs work?",
    "What are the benefits of ETFs?",
    "What are the risks of ETFs?",
    "Are ETFs good for beginners?",
    "What is an expense ratio?",
];

/// Normalize a question to its canonical key form
pub fn canonicalize(question: &str) -> String {
    question.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
}

impl KnowledgeBase {
    /// Build from question -> answer pairs.
    ///
    /// Questions are canonicalized first. Two questions that end up as the
    /// same canonical key are a `Config` error.
    pub fn new<I, Q, A>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let mut map: HashMap<String, String> = HashMap::new();
        for (question, answer) in entries {
            match map.entry(canonicalize(question.as_ref())) {
                Entry::Occupied(slot) => {
                    return Err(AdvisorError::Config(format!(
                        "duplicate question '{}'",
                        slot.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(answer.into());
                }
            }
        }

        Ok(Self { entries: map })
    }

    /// Parse a JSON object of question -> answer
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&raw)?;

        info!(path = %path.display(), entries = kb.len(), "Loaded knowledge base");
        Ok(kb)
    }

    /// Answer for a canonical question, exact key match only
    pub fn answer(&self, canonical_question: &str) -> Option<&str> {
        self.entries.get(canonical_question).map(|s| s.as_str())
    }

    pub fn contains(&self, canonical_question: &str) -> bool {
        self.entries.contains_key(canonical_question)
    }

    /// Canonical questions, sorted
    pub fn questions(&self) -> Vec<&str> {
        let mut questions: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        questions.sort_unstable();
        questions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        // Embedded keys are already canonical and distinct
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect(),
        }
    }
}
