#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::{Instant, Timer};
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig as PinConfig, Pull},
    timer::timg::TimerGroup,
};
use log::{LevelFilter, info, warn};
use stopper_core::{
    SPLASH_MESSAGE,
    input::{ButtonInputController, InputConfig, POLL_INTERVAL_MS},
    model::NetworkListModel,
    scan::scan_and_display,
};
use stopper_hal_esp32::{
    attack::{AttackHandoff, AttackQueue},
    input::buttons::GpioButtons,
    network::WifiScanner,
    platform::display::open_display,
};

const DISPLAY_ADDRESS: u8 = 0x3C;
const DISPLAY_CONFIG: ssd1306::Config = ssd1306::Config::new().with_address(DISPLAY_ADDRESS);
const BUTTON_DEBOUNCE_POLLS: u8 = 1;
const ATTACK_QUEUE_DEPTH: usize = 2;
const RADIO_SETTLE_MS: u64 = 500;

static ATTACK_ORDERS: AttackQueue<CriticalSectionRawMutex, ATTACK_QUEUE_DEPTH> = Channel::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

async fn park() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: stopper starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // esp-radio requires an allocator.
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let radio = match esp_radio::init() {
        Ok(radio) => radio,
        Err(err) => {
            info!("esp-radio init failed: {:?}", err);
            park().await
        }
    };

    let (wifi_controller, _interfaces) =
        match esp_radio::wifi::new(&radio, peripherals.WIFI, esp_radio::wifi::Config::default()) {
            Ok(parts) => parts,
            Err(err) => {
                info!("wifi peripheral init failed: {:?}", err);
                park().await
            }
        };

    let mut scanner = match WifiScanner::new(wifi_controller) {
        Ok(scanner) => scanner,
        Err(err) => {
            info!("wifi mode config failed: {:?}", err);
            park().await
        }
    };

    Timer::after_millis(RADIO_SETTLE_MS).await;

    // Panel wiring: SDA=GPIO21, SCL=GPIO22
    esp_println::println!("display: init begin (SDA=21 SCL=22 addr=0x3C)");
    let mut display = match open_display(
        peripherals.I2C0,
        peripherals.GPIO21,
        peripherals.GPIO22,
        DISPLAY_CONFIG,
    ) {
        Ok(display) => display,
        Err(err) => {
            esp_println::println!("display: bus config failed");
            info!("display bus config failed: {:?}", err);
            park().await
        }
    };
    if let Err(err) = display.initialize() {
        esp_println::println!("display: initialize failed");
        info!("display initialize failed: {:?}", err);
        park().await
    }
    esp_println::println!("display: initialize ok");

    let mut model: NetworkListModel<_> = NetworkListModel::new(display);
    let mut display_fault_logged = false;
    if let Err(err) = model.show_message(SPLASH_MESSAGE) {
        esp_println::println!("display: splash flush failed");
        info!("display splash flush failed: {:?}", err);
        display_fault_logged = true;
    }

    // Buttons: UP=GPIO12, DOWN=GPIO13, SELECT=GPIO0 (BOOT), all active low
    let pin_cfg = PinConfig::default().with_pull(Pull::Up);
    let mut buttons = GpioButtons::new(
        Input::new(peripherals.GPIO12, pin_cfg),
        Input::new(peripherals.GPIO13, pin_cfg),
        Input::new(peripherals.GPIO0, pin_cfg),
    );
    let mut controller = ButtonInputController::new(
        InputConfig::default().with_debounce_polls(BUTTON_DEBOUNCE_POLLS),
    );
    let mut handoff = AttackHandoff::new(&ATTACK_ORDERS);

    info!("Starting Wi-Fi scan...");
    match scan_and_display(&mut scanner, &mut model).await {
        Ok(count) => info!("scan: {} networks listed", count),
        Err(err) => warn!("scan failed: {:?}", err),
    }

    let ui_future = async {
        let mut button_fault_logged = false;

        loop {
            let now_ms = Instant::now().as_millis();
            match controller.poll(now_ms, &mut buttons, &mut model, &mut handoff) {
                Ok(report) => {
                    if let Some(err) = report.display_fault {
                        if !display_fault_logged {
                            esp_println::println!("display: flush failed");
                            warn!("display flush failed: {:?}", err);
                            display_fault_logged = true;
                        }
                    }
                }
                Err(err) => {
                    if !button_fault_logged {
                        warn!("button read failed: {:?}", err);
                        button_fault_logged = true;
                    }
                }
            }

            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    };

    // Attack engine is not linked into this image; orders end here.
    let attack_future = async {
        loop {
            let order = ATTACK_ORDERS.receive().await;
            info!(
                "attack order: {:?}/{:?} timeout={}s target={:?} bssid={:02x?} ch={}",
                order.kind,
                order.method,
                order.timeout_secs,
                order.target.name(),
                order.target.bssid,
                order.target.channel
            );
        }
    };

    let _ = embassy_futures::join::join(ui_future, attack_future).await;
    unreachable!()
}
