use clap::{Parser, ValueEnum};
use mmreg_raw::RegisterLayout;
use tracing_subscriber::EnvFilter;

use systick::driver::registers::TENMS_MASK;
use systick::{
    Calibration, ReloadPolicy, Result, SimulatedBlock, Systick, SystickConfig, SystickModel,
};

#[derive(Parser, Debug)]
#[command(name = "systick-sim")]
#[command(about = "Drive the SysTick timer against a simulated register block")]
struct Args {
    #[arg(long, default_value_t = 16_000_000, help = "System clock frequency in Hz")]
    clock_hz: u32,

    #[arg(long, default_value_t = 1000, help = "Requested SysTick frequency in Hz")]
    tick_hz: u32,

    #[arg(
        long,
        value_enum,
        default_value_t = PolicyArg::Clamp24,
        help = "How an out-of-range reload value is handled"
    )]
    reload_policy: PolicyArg,

    #[arg(long, default_value_t = 50_000_000, help = "Clock cycles to simulate")]
    ticks: u64,

    #[arg(
        short,
        long,
        help = "Enable verbose logging (shows all register reads and writes)"
    )]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Clamp into the 24-bit reload range
    Clamp24,
    /// Program the computed reload value unchanged
    Unclamped,
}

impl From<PolicyArg> for ReloadPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Clamp24 => ReloadPolicy::Clamp24,
            PolicyArg::Unclamped => ReloadPolicy::Unclamped,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides the verbose flag
    let default_level = if args.verbose { "trace" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SystickConfig::new(args.clock_hz, args.tick_hz)
        .with_reload_policy(args.reload_policy.into());
    config.validate()?;

    // Calibration as a part without a reference clock would report it
    let calib = Calibration {
        ten_ms: (args.clock_hz / 100).saturating_sub(1) & TENMS_MASK,
        skew: args.clock_hz % 100 != 0,
        no_ref: true,
    };
    let block = SimulatedBlock::with_calibration(calib.to_register_value());

    // SAFETY: `block` is declared first, so it outlives the driver.
    let mut systick = unsafe { Systick::new(block.base_address(), config)? };

    let calib = systick.calibration();
    tracing::info!(
        "Calibration: TENMS={}, skew={}, noref={}",
        calib.ten_ms,
        calib.skew,
        calib.no_ref
    );
    tracing::info!(
        "Interval {} clocks, reload {}",
        systick.interval(),
        systick.reload()
    );

    systick.enable()?;

    let mut model = SystickModel::new(&block);
    let wraps = model.advance(args.ticks);

    tracing::info!(
        "Simulated {} clocks: {} wraps, {} interrupts",
        args.ticks,
        wraps,
        model.interrupts()
    );
    tracing::info!(
        "count={}, overflow={}",
        systick.count(),
        systick.overflow()
    );

    if systick.acknowledge_irq() {
        model.acknowledge();
        tracing::info!("Acknowledged pending SysTick interrupt");
    }

    systick.disable()?;
    Ok(())
}
