// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rmt::PulseCode;
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_smartled::smart_led_buffer;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use helmet_firmware::config::{
    EXTRA_HEAP_SIZE, HTTP_TASK_COUNT, I2C_FREQUENCY_KHZ, LED_BUFFER_SIZE, LED_COUNT,
    RMT_CLOCK_MHZ, TM1637_BRIGHTNESS, WIFI_HEAP_SIZE,
};
use helmet_firmware::hal::{
    AdcMicrophone, ChannelLink, HelmetBoard, LedcBuzzer, Mpu6050, QuadratureEncoder, RmtLedStrip,
    Sonar, Tm1637, report_imu_init,
};
use helmet_firmware::tasks::{
    connection_task, dhcp_task, game_loop_task, http_server_task, net_task,
};
use helmet_firmware::{ControlCommandChannel, NotificationChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Peripherie, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // ========================================================================
    // Helm-Hardware
    // ========================================================================

    // RMT-Buffer muss 'static sein (wird vom LED-Strip dauerhaft genutzt)
    static RMT_BUFFER: static_cell::StaticCell<[PulseCode; LED_BUFFER_SIZE]> =
        static_cell::StaticCell::new();
    let rmt_buffer = RMT_BUFFER.init_with(|| smart_led_buffer!(LED_COUNT));

    // LED-Strip Daten: GPIO8 (LED_GPIO_PIN)
    let strip = RmtLedStrip::new(peripherals.GPIO8, peripherals.RMT, RMT_CLOCK_MHZ, rmt_buffer)
        .expect("Failed to initialize RMT for LED strip");

    // Buzzer: GPIO10 (LEDC PWM)
    let buzzer = LedcBuzzer::new(peripherals.LEDC, peripherals.GPIO10)
        .expect("Failed to initialize LEDC for buzzer");

    // MPU6050: SDA GPIO22, SCL GPIO23
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .expect("Failed to initialize I2C")
    .with_sda(peripherals.GPIO22)
    .with_scl(peripherals.GPIO23);
    let mut imu = Mpu6050::new(i2c);
    // Ohne MPU6050 läuft das Spiel weiter, nur Nicken wird nie erkannt
    report_imu_init(imu.wake());

    // Kommando-Channel (WebSocket → Game Loop)
    static COMMAND_CHANNEL: static_cell::StaticCell<ControlCommandChannel> =
        static_cell::StaticCell::new();
    let command_channel = &*COMMAND_CHANNEL.init(ControlCommandChannel::new());

    // Benachrichtigungs-Channel (Game Loop → alle WebSockets)
    // Params: <Mutex, Message, Capacity, MaxSubscribers, MaxPublishers>
    static NOTIFICATION_CHANNEL: static_cell::StaticCell<NotificationChannel> =
        static_cell::StaticCell::new();
    let notification_channel = &*NOTIFICATION_CHANNEL.init(NotificationChannel::new());
    let notification_publisher = notification_channel.publisher().unwrap();

    let board = HelmetBoard {
        strip,
        buzzer,
        // TM1637: CLK GPIO18, DIO GPIO19
        display: Tm1637::new(peripherals.GPIO18, peripherals.GPIO19, TM1637_BRIGHTNESS),
        // Drehgeber: CLK GPIO2, DT GPIO3 (interne Pull-Ups)
        encoder: QuadratureEncoder::new(peripherals.GPIO2, peripherals.GPIO3),
        // HC-SR04: TRIG GPIO6, ECHO GPIO7
        sonar: Sonar::new(peripherals.GPIO6, peripherals.GPIO7),
        imu,
        // Mikrofon: GPIO5 (ADC1)
        mic: AdcMicrophone::new(peripherals.ADC1, peripherals.GPIO5),
        link: ChannelLink::new(command_channel.receiver(), notification_publisher),
    };
    info!("Board: hardware initialized");

    // Game Loop zuerst starten: das Spiel braucht kein WiFi
    spawner.spawn(game_loop_task(board)).unwrap();

    // ========================================================================
    // WiFi & Netzwerk
    // ========================================================================

    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Sockets: HTTP-Listener + bis zu 10 WebSocket-Clients + DHCP/DNS
    static RESOURCES: static_cell::StaticCell<StackResources<12>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // HTTP Server Tasks (jede Instanz bedient eine Connection gleichzeitig)
    for task_id in 0..HTTP_TASK_COUNT {
        spawner
            .spawn(http_server_task(
                task_id,
                stack,
                notification_channel,
                command_channel.sender(),
            ))
            .unwrap();
    }

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
