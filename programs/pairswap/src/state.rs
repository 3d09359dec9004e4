use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::PairSwapError,
    pricing::{initial_share, proportional_share, quote_swap, redemption, swap_fee},
};

// ─── GlobalStats ───────────────────────────────────────────────────────────
// Program-wide singleton: pool id source, cumulative swap statistics and the
// platform switch. Written by initialize, set_platform_status, create_pool
// and the swaps; never closed.
#[account]
#[derive(Default, Debug)]
pub struct GlobalStats {
    /// Privileged key allowed to create pools and toggle the platform
    pub owner: Pubkey,              // 32
    /// Number of pools created; the next pool id is pool_counter + 1
    pub pool_counter: u64,          // 8
    /// Sum of every swap's full amount_in, both directions, not netted
    pub total_volume: u128,         // 16
    /// Sum of every swap's fee portion
    pub total_fees: u128,           // 16
    pub platform_active: bool,      // 1
    pub bump: u8,                   // 1
}

impl GlobalStats {
    // 8 discriminator + 32+8+16+16+1+1 = 82
    pub const LEN: usize = 82;

    /// Id the next create_pool call will assign. Pool ids start at 1.
    pub fn next_pool_id(&self) -> u64 {
        self.pool_counter.saturating_add(1)
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.platform_active, PairSwapError::NotAuthorized);
        Ok(())
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, PairSwapError::NotAuthorized);
        Ok(())
    }

    /// Validate a create_pool call and return the id it will receive.
    /// Checks run owner, platform, name length, in that order. Reads only.
    pub fn plan_pool(&self, caller: &Pubkey, name: &str) -> Result<u64> {
        self.ensure_owner(caller)?;
        self.ensure_active()?;
        require!(name.len() <= MAX_POOL_NAME_LEN, PairSwapError::NameTooLong);
        let pool_id = self
            .pool_counter
            .checked_add(1)
            .ok_or(PairSwapError::MathOverflow)?;
        Ok(pool_id)
    }

    /// Consume the next pool id and advance the counter.
    pub fn register_pool(&mut self) -> Result<u64> {
        let pool_id = self
            .pool_counter
            .checked_add(1)
            .ok_or(PairSwapError::MathOverflow)?;
        self.pool_counter = pool_id;
        Ok(pool_id)
    }

    pub fn record_swap(&mut self, amount_in: u64, fee: u64) -> Result<()> {
        self.total_volume = self
            .total_volume
            .checked_add(amount_in as u128)
            .ok_or(PairSwapError::MathOverflow)?;
        self.total_fees = self
            .total_fees
            .checked_add(fee as u128)
            .ok_or(PairSwapError::MathOverflow)?;
        Ok(())
    }
}

// ─── Pool ──────────────────────────────────────────────────────────────────
// Constant-product pool (x * y = k) with a fixed 0.30 % fee.
// Reserves are ledger fields, not vault balances: tokens sent straight to a
// vault are not part of the curve.
#[account]
#[derive(Default, Debug)]
pub struct Pool {
    /// Sequential id, assigned from GlobalStats.pool_counter, never reused
    pub pool_id: u64,               // 8
    pub token_a_mint: Pubkey,       // 32
    pub token_b_mint: Pubkey,       // 32
    /// Vaults owned by the pool-authority PDA
    pub token_a_vault: Pubkey,      // 32
    pub token_b_vault: Pubkey,      // 32
    /// LP mint; the pool-authority PDA is its mint authority
    pub lp_mint: Pubkey,            // 32
    pub authority_bump: u8,         // 1
    pub bump: u8,                   // 1
    pub reserve_a: u64,             // 8
    pub reserve_b: u64,             // 8
    pub total_lp_supply: u64,       // 8
    /// Set at creation; nothing clears it
    pub active: bool,               // 1
    /// Slot of creation
    pub created_at: u64,            // 8
    /// Free-form label, not a key. Kept last so every other field has a
    /// fixed offset.
    pub name: String,               // 4 + MAX_POOL_NAME_LEN
}

impl Pool {
    // 8 discriminator + 8 + 5*32 + 1+1 + 3*8 + 1 + 8 + (4 + 32) = 247
    pub const LEN: usize = 8 + 8 + 5 * 32 + 1 + 1 + 3 * 8 + 1 + 8 + 4 + MAX_POOL_NAME_LEN;

    /// Pool must be live and the platform switched on, in that order.
    pub fn ensure_open(&self, stats: &GlobalStats) -> Result<()> {
        require!(self.active, PairSwapError::PoolNotFound);
        stats.ensure_active()
    }

    /// `(reserve_in, reserve_out)` for a trade direction.
    pub fn reserves_for(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Validate a deposit and compute its LP mint. Reads only.
    pub fn plan_deposit(
        &self,
        stats: &GlobalStats,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<DepositPlan> {
        self.ensure_open(stats)?;
        require!(amount_a > 0 && amount_b > 0, PairSwapError::InvalidAmount);

        let lp_minted = if self.total_lp_supply == 0 {
            initial_share(amount_a, amount_b)
        } else {
            proportional_share(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                self.total_lp_supply,
            )?
        };
        // Per-call floor, also on non-initial deposits
        require!(lp_minted >= MIN_LIQUIDITY, PairSwapError::ZeroLiquidity);

        Ok(DepositPlan {
            amount_a,
            amount_b,
            lp_minted,
            reserve_a: self
                .reserve_a
                .checked_add(amount_a)
                .ok_or(PairSwapError::MathOverflow)?,
            reserve_b: self
                .reserve_b
                .checked_add(amount_b)
                .ok_or(PairSwapError::MathOverflow)?,
            total_lp_supply: self
                .total_lp_supply
                .checked_add(lp_minted)
                .ok_or(PairSwapError::MathOverflow)?,
        })
    }

    pub fn apply_deposit(&mut self, plan: &DepositPlan) {
        self.reserve_a = plan.reserve_a;
        self.reserve_b = plan.reserve_b;
        self.total_lp_supply = plan.total_lp_supply;
    }

    /// Validate a withdrawal and price it against the pre-burn supply.
    /// `position` is `None` when the caller never deposited into this pool.
    pub fn plan_withdrawal(
        &self,
        stats: &GlobalStats,
        position: Option<&Position>,
        lp_tokens: u64,
    ) -> Result<WithdrawalPlan> {
        self.ensure_open(stats)?;
        let position = position.ok_or(PairSwapError::NotAuthorized)?;
        require!(lp_tokens > 0, PairSwapError::InvalidAmount);
        require!(
            lp_tokens <= position.lp_tokens,
            PairSwapError::InsufficientLiquidity
        );
        require!(self.total_lp_supply > 0, PairSwapError::InsufficientLiquidity);

        let amount_a = redemption(lp_tokens, self.reserve_a, self.total_lp_supply)?;
        let amount_b = redemption(lp_tokens, self.reserve_b, self.total_lp_supply)?;

        Ok(WithdrawalPlan {
            lp_burned: lp_tokens,
            amount_a,
            amount_b,
            reserve_a: self
                .reserve_a
                .checked_sub(amount_a)
                .ok_or(PairSwapError::InsufficientLiquidity)?,
            reserve_b: self
                .reserve_b
                .checked_sub(amount_b)
                .ok_or(PairSwapError::InsufficientLiquidity)?,
            total_lp_supply: self
                .total_lp_supply
                .checked_sub(lp_tokens)
                .ok_or(PairSwapError::InsufficientLiquidity)?,
        })
    }

    pub fn apply_withdrawal(&mut self, plan: &WithdrawalPlan) {
        self.reserve_a = plan.reserve_a;
        self.reserve_b = plan.reserve_b;
        self.total_lp_supply = plan.total_lp_supply;
    }

    /// Validate a swap and price it. Reads only.
    pub fn plan_swap(
        &self,
        stats: &GlobalStats,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapPlan> {
        self.ensure_open(stats)?;
        require!(amount_in > 0, PairSwapError::InvalidAmount);

        let (reserve_in, reserve_out) = self.reserves_for(direction);
        let amount_out = quote_swap(amount_in, reserve_in, reserve_out);
        require!(amount_out > 0, PairSwapError::InsufficientLiquidity);
        require!(amount_out >= min_amount_out, PairSwapError::SlippageTooHigh);

        Ok(SwapPlan {
            direction,
            amount_in,
            amount_out,
            fee: swap_fee(amount_in),
            // full amount_in: the fee stays in the pool
            reserve_in: reserve_in
                .checked_add(amount_in)
                .ok_or(PairSwapError::MathOverflow)?,
            reserve_out: reserve_out
                .checked_sub(amount_out)
                .ok_or(PairSwapError::InsufficientLiquidity)?,
        })
    }

    pub fn apply_swap(&mut self, plan: &SwapPlan) {
        match plan.direction {
            SwapDirection::AToB => {
                self.reserve_a = plan.reserve_in;
                self.reserve_b = plan.reserve_out;
            }
            SwapDirection::BToA => {
                self.reserve_b = plan.reserve_in;
                self.reserve_a = plan.reserve_out;
            }
        }
    }
}

// ─── Position ──────────────────────────────────────────────────────────────
// One holder's LP holding and deposit history in a single pool.
// Created on first deposit and never closed, even at zero LP tokens.
#[account]
#[derive(Default, Debug)]
pub struct Position {
    pub pool: Pubkey,                    // 32
    pub pool_id: u64,                    // 8
    pub holder: Pubkey,                  // 32
    /// LP tokens currently attributed to this holder
    pub lp_tokens: u64,                  // 8
    /// Running deposit totals; withdrawals never decrement them
    pub token_a_deposited: u128,         // 16
    pub token_b_deposited: u128,         // 16
    /// Slot of the last deposit or withdrawal
    pub last_activity: u64,              // 8
    pub bump: u8,                        // 1
}

impl Position {
    // 8 + 32+8+32+8+16+16+8+1 = 129
    pub const LEN: usize = 129;

    pub fn is_initialized(&self) -> bool {
        self.holder != Pubkey::default()
    }

    /// Insert-or-merge a deposit and return the merged record.
    pub fn upsert_deposit(
        &mut self,
        key: PositionKey,
        plan: &DepositPlan,
        slot: u64,
    ) -> Result<&Position> {
        if !self.is_initialized() {
            self.pool = key.pool;
            self.pool_id = key.pool_id;
            self.holder = key.holder;
            self.bump = key.bump;
        }
        self.lp_tokens = self
            .lp_tokens
            .checked_add(plan.lp_minted)
            .ok_or(PairSwapError::MathOverflow)?;
        self.token_a_deposited = self
            .token_a_deposited
            .checked_add(plan.amount_a as u128)
            .ok_or(PairSwapError::MathOverflow)?;
        self.token_b_deposited = self
            .token_b_deposited
            .checked_add(plan.amount_b as u128)
            .ok_or(PairSwapError::MathOverflow)?;
        self.last_activity = slot;
        Ok(self)
    }

    /// Deduct burned LP tokens. Deposit totals are left alone.
    pub fn record_withdrawal(&mut self, plan: &WithdrawalPlan, slot: u64) -> Result<&Position> {
        self.lp_tokens = self
            .lp_tokens
            .checked_sub(plan.lp_burned)
            .ok_or(PairSwapError::InsufficientLiquidity)?;
        self.last_activity = slot;
        Ok(self)
    }
}

/// Identity written into a position the first time it is used.
#[derive(Clone, Copy, Debug)]
pub struct PositionKey {
    pub pool: Pubkey,
    pub pool_id: u64,
    pub holder: Pubkey,
    pub bump: u8,
}

// ─── Plans ─────────────────────────────────────────────────────────────────
// Output of the validating `plan_*` methods: the amounts to move and the
// pool's post-operation values. Applying a plan cannot fail.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

impl SwapDirection {
    pub fn is_a_to_b(self) -> bool {
        self == SwapDirection::AToB
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositPlan {
    pub amount_a: u64,
    pub amount_b: u64,
    pub lp_minted: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_lp_supply: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalPlan {
    pub lp_burned: u64,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_lp_supply: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapPlan {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee: u64,
    pub reserve_in: u64,
    pub reserve_out: u64,
}

/// Return data of remove_liquidity.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount_a: u64,
    pub amount_b: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn expect_err<T: std::fmt::Debug>(res: Result<T>, want: PairSwapError) {
        assert_eq!(code(res.unwrap_err()), u32::from(want));
    }

    fn stats() -> GlobalStats {
        GlobalStats {
            owner: Pubkey::new_unique(),
            platform_active: true,
            ..Default::default()
        }
    }

    fn pool(pool_id: u64) -> Pool {
        Pool {
            pool_id,
            active: true,
            name: "A/B".to_string(),
            ..Default::default()
        }
    }

    fn key(pool: &Pool, holder: Pubkey) -> PositionKey {
        PositionKey { pool: Pubkey::new_unique(), pool_id: pool.pool_id, holder, bump: 255 }
    }

    /// Pool seeded with (1_000_000, 2_000_000) by `holder`.
    fn seeded(holder: Pubkey) -> (GlobalStats, Pool, Position) {
        let stats = stats();
        let mut pool = pool(1);
        let mut position = Position::default();
        let plan = pool.plan_deposit(&stats, 1_000_000, 2_000_000).unwrap();
        pool.apply_deposit(&plan);
        position.upsert_deposit(key(&pool, holder), &plan, 10).unwrap();
        (stats, pool, position)
    }

    #[test]
    fn account_sizes_match_layout() {
        assert_eq!(GlobalStats::LEN, 82);
        assert_eq!(Pool::LEN, 247);
        assert_eq!(Position::LEN, 129);
    }

    #[test]
    fn pool_ids_are_sequential_from_one() {
        let mut stats = stats();
        assert_eq!(stats.next_pool_id(), 1);
        assert_eq!(stats.register_pool().unwrap(), 1);
        assert_eq!(stats.next_pool_id(), 2);
        assert_eq!(stats.register_pool().unwrap(), 2);
        assert_eq!(stats.pool_counter, 2);
    }

    #[test]
    fn pool_plan_accepts_names_up_to_limit() {
        let stats = stats();
        let name = "x".repeat(MAX_POOL_NAME_LEN);
        assert_eq!(stats.plan_pool(&stats.owner, &name).unwrap(), 1);
        assert_eq!(stats.plan_pool(&stats.owner, "").unwrap(), 1);
        expect_err(
            stats.plan_pool(&stats.owner, &"x".repeat(MAX_POOL_NAME_LEN + 1)),
            PairSwapError::NameTooLong,
        );
        // byte length, not chars: 11 three-byte chars = 33 bytes
        expect_err(stats.plan_pool(&stats.owner, &"€".repeat(11)), PairSwapError::NameTooLong);
    }

    #[test]
    fn pool_plan_checks_owner_then_platform_then_name() {
        let mut stats = stats();
        let long = "x".repeat(MAX_POOL_NAME_LEN + 1);
        let stranger = Pubkey::new_unique();

        expect_err(stats.plan_pool(&stranger, "A/B"), PairSwapError::NotAuthorized);
        stats.platform_active = false;
        expect_err(stats.plan_pool(&stats.owner, "A/B"), PairSwapError::NotAuthorized);
        // owner check fires before the name check
        expect_err(stats.plan_pool(&stranger, &long), PairSwapError::NotAuthorized);
        // platform check fires before the name check
        expect_err(stats.plan_pool(&stats.owner, &long), PairSwapError::NotAuthorized);
        assert_eq!(stats.pool_counter, 0);
    }

    #[test]
    fn pool_plan_matches_registered_id() {
        let mut stats = stats();
        stats.pool_counter = 41;
        let planned = stats.plan_pool(&stats.owner, "A/B").unwrap();
        assert_eq!(planned, stats.next_pool_id());
        assert_eq!(stats.register_pool().unwrap(), planned);
    }

    #[test]
    fn pool_plan_rejects_exhausted_counter() {
        let mut stats = stats();
        stats.pool_counter = u64::MAX;
        expect_err(stats.plan_pool(&stats.owner, "A/B"), PairSwapError::MathOverflow);
    }

    #[test]
    fn only_owner_passes_owner_check() {
        let stats = stats();
        assert!(stats.ensure_owner(&stats.owner).is_ok());
        expect_err(stats.ensure_owner(&Pubkey::new_unique()), PairSwapError::NotAuthorized);
    }

    #[test]
    fn initial_deposit_mints_half_sum() {
        let holder = Pubkey::new_unique();
        let (_, pool, position) = seeded(holder);
        assert_eq!(pool.reserve_a, 1_000_000);
        assert_eq!(pool.reserve_b, 2_000_000);
        assert_eq!(pool.total_lp_supply, 1_500_000);
        assert_eq!(position.lp_tokens, 1_500_000);
        assert_eq!(position.holder, holder);
        assert_eq!(position.token_a_deposited, 1_000_000);
        assert_eq!(position.token_b_deposited, 2_000_000);
        assert_eq!(position.last_activity, 10);
    }

    #[test]
    fn full_withdrawal_empties_pool() {
        let (stats, mut pool, mut position) = seeded(Pubkey::new_unique());
        let plan = pool.plan_withdrawal(&stats, Some(&position), 1_500_000).unwrap();
        assert_eq!((plan.amount_a, plan.amount_b), (1_000_000, 2_000_000));
        pool.apply_withdrawal(&plan);
        position.record_withdrawal(&plan, 11).unwrap();

        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_supply), (0, 0, 0));
        assert_eq!(position.lp_tokens, 0);
        // deposit history survives
        assert_eq!(position.token_a_deposited, 1_000_000);
        assert_eq!(position.token_b_deposited, 2_000_000);
        assert_eq!(position.last_activity, 11);
    }

    #[test]
    fn swap_a_for_b_reference_trade() {
        let (stats, mut pool, _) = seeded(Pubkey::new_unique());
        let plan = pool
            .plan_swap(&stats, SwapDirection::AToB, 1_000_000, 900_000)
            .unwrap();
        assert_eq!(plan.amount_out, 998_497);
        assert_eq!(plan.fee, 3_000);
        pool.apply_swap(&plan);
        assert_eq!(pool.reserve_a, 2_000_000);
        assert_eq!(pool.reserve_b, 1_001_503);
    }

    #[test]
    fn swap_b_for_a_uses_mirrored_reserves() {
        let (stats, mut pool, _) = seeded(Pubkey::new_unique());
        let plan = pool
            .plan_swap(&stats, SwapDirection::BToA, 2_000_000, 0)
            .unwrap();
        // 1_994_000 * 1_000_000 / 3_994_000
        assert_eq!(plan.amount_out, 499_248);
        pool.apply_swap(&plan);
        assert_eq!(pool.reserve_b, 4_000_000);
        assert_eq!(pool.reserve_a, 1_000_000 - 499_248);
    }

    #[test]
    fn slippage_guard_rejects_and_leaves_pool_alone() {
        let (stats, pool, _) = seeded(Pubkey::new_unique());
        let before = (pool.reserve_a, pool.reserve_b, pool.total_lp_supply);
        expect_err(
            pool.plan_swap(&stats, SwapDirection::AToB, 1_000_000, 999_000),
            PairSwapError::SlippageTooHigh,
        );
        assert_eq!((pool.reserve_a, pool.reserve_b, pool.total_lp_supply), before);
    }

    #[test]
    fn swap_errors() {
        let (mut stats, mut pool, _) = seeded(Pubkey::new_unique());
        expect_err(
            pool.plan_swap(&stats, SwapDirection::AToB, 0, 0),
            PairSwapError::InvalidAmount,
        );
        // 1 * 1_000_000 / 2_000_001 truncates to zero
        expect_err(
            pool.plan_swap(&stats, SwapDirection::BToA, 1, 0),
            PairSwapError::InsufficientLiquidity,
        );
        expect_err(
            self::pool(2).plan_swap(&stats, SwapDirection::AToB, 1_000, 0),
            PairSwapError::InsufficientLiquidity,
        );
        stats.platform_active = false;
        expect_err(
            pool.plan_swap(&stats, SwapDirection::AToB, 1_000, 0),
            PairSwapError::NotAuthorized,
        );
        pool.active = false;
        expect_err(
            pool.plan_swap(&stats, SwapDirection::AToB, 1_000, 0),
            PairSwapError::PoolNotFound,
        );
    }

    #[test]
    fn deposit_errors() {
        let mut stats = stats();
        let mut pool = pool(1);
        expect_err(pool.plan_deposit(&stats, 0, 5_000), PairSwapError::InvalidAmount);
        expect_err(pool.plan_deposit(&stats, 5_000, 0), PairSwapError::InvalidAmount);
        // 999 LP: below the floor
        expect_err(pool.plan_deposit(&stats, 998, 1_000), PairSwapError::ZeroLiquidity);
        assert_eq!(pool.plan_deposit(&stats, 1_000, 1_000).unwrap().lp_minted, 1_000);

        stats.platform_active = false;
        expect_err(pool.plan_deposit(&stats, 5_000, 5_000), PairSwapError::NotAuthorized);
        pool.active = false;
        expect_err(pool.plan_deposit(&stats, 5_000, 5_000), PairSwapError::PoolNotFound);
    }

    #[test]
    fn liquidity_floor_applies_to_later_deposits() {
        let (stats, pool, _) = seeded(Pubkey::new_unique());
        // 600 * 1.5 = 900 LP on the A side
        expect_err(pool.plan_deposit(&stats, 600, 1_200), PairSwapError::ZeroLiquidity);
        let plan = pool.plan_deposit(&stats, 1_000, 2_000).unwrap();
        assert_eq!(plan.lp_minted, 1_500);
    }

    #[test]
    fn out_of_ratio_deposit_forfeits_surplus() {
        let (stats, mut pool, _) = seeded(Pubkey::new_unique());
        let plan = pool.plan_deposit(&stats, 100_000, 1_000_000).unwrap();
        // limited by A: 100_000 * 1_500_000 / 1_000_000
        assert_eq!(plan.lp_minted, 150_000);
        pool.apply_deposit(&plan);
        assert_eq!(pool.reserve_b, 3_000_000);
        assert_eq!(pool.total_lp_supply, 1_650_000);
    }

    #[test]
    fn withdrawal_errors() {
        let holder = Pubkey::new_unique();
        let (mut stats, mut pool, position) = seeded(holder);
        expect_err(pool.plan_withdrawal(&stats, None, 10), PairSwapError::NotAuthorized);
        expect_err(
            pool.plan_withdrawal(&stats, Some(&position), 0),
            PairSwapError::InvalidAmount,
        );
        expect_err(
            pool.plan_withdrawal(&stats, Some(&position), 1_500_001),
            PairSwapError::InsufficientLiquidity,
        );
        stats.platform_active = false;
        expect_err(
            pool.plan_withdrawal(&stats, Some(&position), 10),
            PairSwapError::NotAuthorized,
        );
        stats.platform_active = true;
        pool.active = false;
        expect_err(
            pool.plan_withdrawal(&stats, Some(&position), 10),
            PairSwapError::PoolNotFound,
        );
    }

    #[test]
    fn withdrawal_from_drained_supply_is_rejected() {
        let stats = stats();
        let pool = pool(1);
        let position = Position { lp_tokens: 10, ..Default::default() };
        expect_err(
            pool.plan_withdrawal(&stats, Some(&position), 10),
            PairSwapError::InsufficientLiquidity,
        );
    }

    #[test]
    fn upsert_merges_repeat_deposits() {
        let holder = Pubkey::new_unique();
        let (stats, mut pool, mut position) = seeded(holder);
        let first_pool = position.pool;

        let plan = pool.plan_deposit(&stats, 2_000, 4_000).unwrap();
        pool.apply_deposit(&plan);
        let merged = position.upsert_deposit(key(&pool, holder), &plan, 42).unwrap();

        assert_eq!(merged.lp_tokens, 1_503_000);
        assert_eq!(merged.token_a_deposited, 1_002_000);
        assert_eq!(merged.token_b_deposited, 2_004_000);
        assert_eq!(merged.last_activity, 42);
        // identity fixed at first insert
        assert_eq!(merged.pool, first_pool);
        assert_eq!(position.lp_tokens, pool.total_lp_supply);
    }

    #[test]
    fn partial_withdrawal_keeps_pool_funded() {
        let (stats, mut pool, mut position) = seeded(Pubkey::new_unique());
        let plan = pool.plan_withdrawal(&stats, Some(&position), 1_499_999).unwrap();
        pool.apply_withdrawal(&plan);
        position.record_withdrawal(&plan, 12).unwrap();
        assert!(pool.reserve_a > 0 && pool.reserve_b > 0);
        assert_eq!(pool.total_lp_supply, 1);
        assert_eq!(position.lp_tokens, 1);
    }

    #[test]
    fn swap_statistics_accumulate() {
        let mut stats = stats();
        stats.record_swap(1_000_000, 3_000).unwrap();
        stats.record_swap(500, 1).unwrap();
        assert_eq!(stats.total_volume, 1_000_500);
        assert_eq!(stats.total_fees, 3_001);
    }

    #[test]
    fn direction_flag() {
        assert!(SwapDirection::AToB.is_a_to_b());
        assert!(!SwapDirection::BToA.is_a_to_b());
    }
}
