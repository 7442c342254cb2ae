// Page wiring: element ids, CSS classes and user-facing copy.

// Element ids
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const MIC_BUTTON_ID: &str = "start-mic-btn";
pub const INSTRUCTION_ID: &str = "instruction-text";
pub const MUSIC_ID: &str = "bg-music";
pub const CONTENT_ID: &str = "celebration-content";
pub const GALLERY_ID: &str = "gallery";
pub const NAV_ID: &str = "main-nav";
pub const NUMBERS_ID: &str = "number-vectors";
pub const CONTROLS_ID: &str = "interaction-controls";
pub const BALLOON_OVERLAY_ID: &str = "balloon-overlay";
pub const LOADING_ID: &str = "loading-screen";

pub const WISHES_CONTAINER_ID: &str = "wishes-container";
pub const NO_WISHES_ID: &str = "no-wishes-msg";
pub const WISH_INPUT_ID: &str = "wish-input";
pub const NAME_INPUT_ID: &str = "name-input";
pub const SAVE_WISH_ID: &str = "save-wish-btn";
pub const WISH_FORM_SELECTOR: &str = "form[name=\"wishes\"]";

// Utility classes toggled on reveal
pub const HIDDEN: &str = "hidden";
pub const FADED: &str = "opacity-0";
pub const INERT: &str = "pointer-events-none";
pub const INTERACTIVE: &str = "pointer-events-auto";
pub const SLID_DOWN: &str = "translate-y-8";
pub const SCROLL_LOCK: &str = "overflow-y-hidden";

pub const BUBBLE_CLASS: &str =
    "max-w-xs p-5 rounded-2xl shadow-lg border transform transition-transform hover:scale-105 flex flex-col gap-2";
pub const BUBBLE_MESSAGE_CLASS: &str = "font-['Outfit'] text-lg leading-relaxed text-slate-700";
pub const BUBBLE_SENDER_CLASS: &str = "text-right text-sm font-bold opacity-75 text-slate-600";

// Copy
pub const MIC_DENIED_NOTICE: &str =
    "Couldn't access microphone 😢. You can still tap the candles to blow them out!";
pub const WISH_MISSING_FIELDS: &str = "Please fill in both name and message! ✍️";
pub const WISH_SENT: &str = "Wish sent! 💌";
pub const WISH_FAILED: &str = "Oops! Something went wrong. Please try again later. 😅";
pub const SAVE_LABEL: &str = "Send Wish 🌠";
pub const SAVE_BUSY_LABEL: &str = "Sending...";

// Guestbook defaults
pub const DEFAULT_CACHE_KEY: &str = "cake_wishes";
pub const DEFAULT_ENDPOINT: &str = "/";

// Timing (milliseconds)
pub const LOADING_FADE_DELAY_MS: i32 = 1000;
pub const LOADING_REMOVE_DELAY_MS: i32 = 1000;

// Audio
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const MUSIC_VOLUME: f64 = 0.5;
