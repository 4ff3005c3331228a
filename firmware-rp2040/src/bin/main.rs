#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx, UartTx};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use joystick_core::{Consumer, Producer, RingBuffer, SerialPipeline, RX_RING_SIZE};
use joystick_proto::{JoystickReport, DIAG_OVERRUN, DIAG_REPORT_SENT};
use joystick_rp2040::usb::{configure_usb_hid, HidIn, HidOut, UsbDriver};
use joystick_rp2040::{JoystickRequestHandler, SharedState};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Latest decoded controller state. Single writer (the HID IN task's
/// drain pass), read by report builds and GetReport.
static CONTROLLER_STATE: SharedState = SharedState::new();

/// Raw bytes from the receive context to the decode pipeline.
static RX_RING: StaticCell<RingBuffer<RX_RING_SIZE>> = StaticCell::new();

/// Diagnostic marker bytes headed back out the UART. A queue rather
/// than a latest-wins signal: an overrun marker must not be coalesced
/// away by heartbeat markers.
static DIAG: Channel<CriticalSectionRawMutex, u8, 16> = Channel::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state and control request handler.
static HID_STATE: StaticCell<State> = StaticCell::new();
static CONTROL_HANDLER: StaticCell<JoystickRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("serial joystick starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // Receive ring: push-only half to the RX context, pop-only half to
    // the decode pipeline.
    let ring = RX_RING.init(RingBuffer::new());
    let (producer, consumer) = ring.split();

    // --- USB setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    // VID/PID and strings of the pad this device impersonates, so
    // hosts accept it without custom drivers.
    let mut usb_config = UsbConfig::new(0x0f0d, 0x0092);
    usb_config.manufacturer = Some("HORI CO.,LTD.");
    usb_config.product = Some("POKKEN CONTROLLER");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure the HID class with both interrupt endpoints
    let hid_state = HID_STATE.init(State::new());
    let control_handler = CONTROL_HANDLER.init(JoystickRequestHandler::new(&CONTROLLER_STATE));
    let hid = configure_usb_hid(&mut builder, hid_state, control_handler);
    let (hid_out, hid_in) = hid.split();

    // Build the USB device
    let usb_device = builder.build();

    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(uart_rx_task(rx, producer)).unwrap();
    spawner.spawn(decode_task(consumer)).unwrap();
    spawner.spawn(hid_in_task(hid_in)).unwrap();
    spawner.spawn(hid_out_task(hid_out)).unwrap();
    spawner.spawn(diag_task(tx)).unwrap();

    info!("serial joystick initialized, waiting for data...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, UsbDriver>) {
    device.run().await;
}

/// Receive context: byte in, ring push, return. No decoding here.
#[embassy_executor::task]
async fn uart_rx_task(mut rx: UartRx<'static, Async>, mut ring: Producer<'static, RX_RING_SIZE>) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if ring.push(byte[0]).is_err() {
                    warn!("receive ring overrun, backlog dropped");
                    let _ = DIAG.try_send(DIAG_OVERRUN);
                }
            }
            Err(e) => warn!("uart receive error: {:?}", e),
        }
    }
}

/// Decode task: periodic drain of the receive ring into the snapshot.
///
/// Runs on its own cadence, independent of USB state: bytes keep
/// getting decoded while the device is not yet configured or the host
/// has stopped polling the IN endpoint, so sustained serial input
/// never backs up the ring. Each pass processes everything currently
/// buffered; multiple complete lines decode in arrival order and the
/// last publish wins.
#[embassy_executor::task]
async fn decode_task(consumer: Consumer<'static, RX_RING_SIZE>) {
    let mut pipeline = SerialPipeline::new(consumer);
    let mut ticker = Ticker::every(Duration::from_millis(1));

    loop {
        pipeline.drain(&mut &CONTROLLER_STATE);
        ticker.next().await;
    }
}

/// HID IN task: send a fresh report each time the host polls.
///
/// The write future pends until the IN endpoint is ready, so each loop
/// iteration is one report interval and the report always reflects the
/// newest snapshot. A stalled serial source just keeps re-sending the
/// last known state.
#[embassy_executor::task]
async fn hid_in_task(mut hid_in: HidIn) {
    hid_in.ready().await;
    info!("USB configured, HID reports active");

    loop {
        let report = JoystickReport::from(&CONTROLLER_STATE.get());
        match hid_in.write(&report.to_bytes()).await {
            Ok(()) => {
                // Liveness heartbeat for the host
                let _ = DIAG.try_send(DIAG_REPORT_SENT);
            }
            Err(e) => warn!("hid report write failed: {:?}", e),
        }
    }
}

/// HID OUT task: accept and discard host-to-device reports.
#[embassy_executor::task]
async fn hid_out_task(hid_out: HidOut) {
    let mut handler = JoystickRequestHandler::new(&CONTROLLER_STATE);
    hid_out.run(false, &mut handler).await;
}

/// Diagnostic task: forward queued marker bytes out the UART.
#[embassy_executor::task]
async fn diag_task(mut tx: UartTx<'static, Async>) {
    loop {
        let byte = DIAG.receive().await;
        if tx.write(&[byte]).await.is_err() {
            warn!("diagnostic write failed");
        }
    }
}
