/// A child clock derived from the master, ticking every time the master's
/// cycle counter is evenly divisible by `divisor`.
struct ChildClock {
    divisor: u64,
    callback: Box<dyn FnMut()>,
}

/// The master oscillator. Owns a list of child clocks registered at setup
/// time and, on every `tick()`, runs the callback of each child whose
/// divisor evenly divides the new cycle count, in registration order.
///
/// For the NES this drives the CPU (divisor 12) and the PPU (divisor 4) off
/// a single 21,477,272 Hz master rate, which works out to the correct 1:3
/// CPU:PPU cycle ratio. Registering the PPU before the CPU gets the
/// "PPU runs first when both are due" ordering for free, matching the
/// scheduling this codebase already uses to drive its own CPU/PPU pair.
pub struct MasterClock {
    cycle: u64,
    ticking: bool,
    children: Vec<ChildClock>,
}

pub const NES_MASTER_CLOCK_HZ: u64 = 21_477_272;
pub const CPU_DIVISOR: u64 = 12;
pub const PPU_DIVISOR: u64 = 4;

impl MasterClock {
    pub fn new() -> MasterClock {
        MasterClock {
            cycle: 0,
            ticking: false,
            children: Vec::new(),
        }
    }

    /// Registers a child clock. Must happen before the first `tick()`;
    /// children are never added or removed while ticking.
    pub fn add_child<F: FnMut() + 'static>(&mut self, divisor: u64, callback: F) {
        assert!(divisor > 0, "a child clock's divisor must be positive");
        self.children.push(ChildClock {
            divisor,
            callback: Box::new(callback),
        });
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// Advances the master cycle counter by one and runs every child whose
    /// divisor evenly divides the new count, in the order they were added.
    pub fn tick(&mut self) {
        self.cycle += 1;
        for child in self.children.iter_mut() {
            if self.cycle % child.divisor == 0 {
                (child.callback)();
            }
        }
    }

    /// Ticks continuously until `stop()` clears the running flag. The
    /// current tick always completes before the loop checks `ticking`
    /// again; there is no mid-tick cancellation.
    pub fn run(&mut self) {
        self.ticking = true;
        while self.ticking {
            self.tick();
        }
    }

    pub fn stop(&mut self) {
        self.ticking = false;
    }
}

impl Default for MasterClock {
    fn default() -> MasterClock {
        MasterClock::new()
    }
}
