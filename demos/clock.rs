use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use std::{env, error::Error, thread};

use navhud::{Hud, SerialHud};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: clock <serial_port> [utc_offset_minutes]");
        println!();
        println!("serial_port should be a port name like /dev/rfcomm0");
        println!("utc_offset_minutes adjusts the displayed time, e.g. -480 or 120");
        return Ok(());
    }

    let offset_minutes: i64 = if args.len() > 2 { args[2].parse()? } else { 0 };

    let port = serial::open(&args[1])?;
    let port = Rc::new(RefCell::new(SerialHud::new(port)?));
    let mut hud = Hud::new(port);

    // Tick once a second so the display never shows a stale minute for long.
    loop {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH)?;
        let minutes_today = (since_epoch.as_secs() as i64 / 60 + offset_minutes).rem_euclid(24 * 60);
        hud.set_time((minutes_today / 60) as u8, (minutes_today % 60) as u8)?;
        thread::sleep(Duration::from_secs(1));
    }
}
