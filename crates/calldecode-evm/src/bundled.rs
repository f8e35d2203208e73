//! Bundled selector table — well-known DeFi and token functions.
//!
//! Built once on first use and shared read-only for the rest of the process.

use std::sync::{Arc, OnceLock};

use calldecode_core::registry::parse_selector;
use calldecode_core::{MemorySelectorRegistry, SelectorEntry, SelectorRegistry};
use tracing::debug;

static BUNDLED: OnceLock<Arc<MemorySelectorRegistry>> = OnceLock::new();

/// `(selector, name, signature)`
pub const BUNDLED_SELECTORS: &[(&str, &str, &str)] = &[
    // ─── ERC-20 ───────────────────────────────────────────────────────────────
    ("0x70a08231", "balanceOf", "balanceOf(address)"),
    ("0xa9059cbb", "transfer", "transfer(address,uint256)"),
    ("0x23b872dd", "transferFrom", "transferFrom(address,address,uint256)"),
    ("0x095ea7b3", "approve", "approve(address,uint256)"),
    ("0x9dc29fac", "burn", "burn(address,uint256)"),
    ("0x9d63848a", "tokens", "tokens()"),

    // ─── WETH ─────────────────────────────────────────────────────────────────
    ("0xd0e30db0", "deposit", "deposit()"),
    ("0x2e1a7d4d", "withdraw", "withdraw(uint256)"),

    // ─── Uniswap V2 ───────────────────────────────────────────────────────────
    ("0x022c0d9f", "swap", "swap(uint256,uint256,address,bytes)"),
    ("0x0902f1ac", "getReserves", "getReserves()"),
    ("0xa5841194", "sync", "sync(address)"),
    ("0xf140a35a", "getAmountOut", "getAmountOut(uint256,address)"),

    // ─── Uniswap V3 / PancakeSwap V3 ──────────────────────────────────────────
    ("0x128acb08", "swap", "swap(address,bool,int256,uint160,bytes)"),
    ("0xfa461e33", "uniswapV3SwapCallback", "uniswapV3SwapCallback(int256,int256,bytes)"),
    ("0x23a69e75", "pancakeV3SwapCallback", "pancakeV3SwapCallback(int256,int256,bytes)"),
    ("0xd0c93a7c", "tickSpacing", "tickSpacing()"),
    ("0x3850c7bd", "slot0", "slot0()"),
    ("0x1a686502", "liquidity", "liquidity()"),
    ("0x5339c296", "tickBitmap", "tickBitmap(int16)"),
    ("0xf30dba93", "ticks", "ticks(int24)"),
    ("0xddca3f43", "fee", "fee()"),
    ("0x883bdbfd", "observe", "observe(uint32[])"),
    ("0x380dc1c2", "tickSpacingToFee", "tickSpacingToFee(int24)"),
    ("0x0c49ccbe", "decreaseLiquidity", "decreaseLiquidity((uint256,uint128,uint256,uint256,uint256))"),

    // ─── Uniswap V4 PoolManager ───────────────────────────────────────────────
    ("0x48c89491", "unlock", "unlock(bytes)"),
    ("0x91dd7346", "unlockCallback", "unlockCallback(bytes)"),
    ("0xf3cd914c", "swap", "swap((address,address,uint24,int24,address),(bool,int256,uint160),bytes)"),
    ("0xf135baaa", "exttload", "exttload(bytes32)"),
    ("0x0b0d9c09", "take", "take(address,address,uint256)"),
    ("0x11da60b4", "settle", "settle()"),
    ("0x15afd409", "settle", "settle(address,uint256)"),

    // ─── Uniswap Universal Router / Permit2 ───────────────────────────────────
    ("0x3593564c", "execute", "execute(bytes,bytes[],uint256)"),
    ("0x36c78516", "transferFrom", "transferFrom(address,address,uint160,address)"),
    ("0x87517c45", "approve", "approve(address,address,uint160,uint48)"),
    ("0x927da105", "allowance", "allowance(address,address,address)"),

    // ─── Balancer ─────────────────────────────────────────────────────────────
    ("0x72c98186", "onSwap", "onSwap((uint8,uint256,uint256[],uint256,uint256,address,bytes))"),
    ("0x9d2c110c", "onSwap", "onSwap((uint8,address,address,uint256,bytes32,uint256,address,address,bytes),uint256,uint256)"),
    ("0x2bfb780c", "swap", "swap((uint8,address,address,address,uint256,uint256,bytes))"),
    ("0x679aefce", "getRate", "getRate()"),
    ("0xb187bd26", "isPaused", "isPaused()"),

    // ─── Chainlink ────────────────────────────────────────────────────────────
    ("0xfeaf968c", "latestRoundData", "latestRoundData()"),
    ("0x50d25bcd", "latestAnswer", "latestAnswer()"),
    ("0xf90c6906", "priceFeeds", "priceFeeds(address,address)"),

    // ─── Lending (Aave, Morpho) ───────────────────────────────────────────────
    ("0xd15e0053", "getReserveNormalizedIncome", "getReserveNormalizedIncome(address)"),
    ("0x5c60e39a", "market", "market(bytes32)"),
    ("0x8c00bf6b", "borrowRateView", "borrowRateView((address,address,address,address,uint256),(uint128,uint128,uint128,uint128,uint128,uint128))"),

    // ─── Fee / pool factories ─────────────────────────────────────────────────
    ("0xb88c9148", "getFee", "getFee(address)"),
    ("0xcc56b2c5", "getFee", "getFee(address,bool)"),
    ("0x35458dcc", "getSwapFee", "getSwapFee(address)"),
    ("0xcefa7799", "poolImplementation", "poolImplementation()"),
    ("0x1703e5f9", "isAlive", "isAlive(address)"),
    ("0xb9a09fd5", "gauges", "gauges(address)"),
    ("0xa15ea89f", "getLatestPeriodInfo", "getLatestPeriodInfo(address)"),
    ("0xe468baf0", "allWhitelistedTokens", "allWhitelistedTokens(uint256)"),
    ("0xdaf9c210", "whitelistedTokens", "whitelistedTokens(address)"),
    ("0x0a5ea466", "claimTokens", "claimTokens(address,address,address,uint256)"),
    ("0xe55186a1", "getUnit", "getUnit()"),

    // ─── Aggregators / batch executors ────────────────────────────────────────
    ("0x13fb72c7", "executeBatchWithCallback", "executeBatchWithCallback((bytes,bytes)[],bytes)"),
    ("0xe5135ec6", "executeBatch", "executeBatch((bytes,bytes)[],bytes)"),
    ("0x0d335884", "executeWithCallback", "executeWithCallback((bytes,bytes),bytes)"),
    ("0x61461954", "execute", "execute()"),
    ("0xae639329", "sendTo", "sendTo(address,address,uint256)"),
    ("0xee63c1e5", "swapUniV3", "swapUniV3()"),
    ("0x64ee4b80", "gm", "gm(address,uint8)"),
];

/// The process-wide bundled registry.
pub fn registry() -> Arc<MemorySelectorRegistry> {
    BUNDLED.get_or_init(|| Arc::new(build())).clone()
}

/// A fresh, owned copy of the bundled table, for callers that extend it.
pub fn build() -> MemorySelectorRegistry {
    let reg = MemorySelectorRegistry::from_entries(BUNDLED_SELECTORS.iter().filter_map(
        |(selector, name, signature)| {
            Some((parse_selector(selector)?, SelectorEntry::new(*name, *signature)))
        },
    ));
    debug!(count = reg.len(), "bundled selector registry built");
    reg
}
