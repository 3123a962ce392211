//! Built-in symbol tables loaded by `Environment::new`

/// General MIDI program numbers
pub const INSTRUMENTS: &[(&str, u16)] = &[
    ("PIANO", 0),
    ("ACOUSTIC_GRAND", 0),
    ("BRIGHT_ACOUSTIC", 1),
    ("ELECTRIC_GRAND", 2),
    ("HONKEY_TONK", 3),
    ("ELECTRIC_PIANO", 4),
    ("ELECTRIC_PIANO_1", 4),
    ("ELECTRIC_PIANO_2", 5),
    ("HARPSICHORD", 6),
    ("CLAVINET", 7),
    ("CELESTA", 8),
    ("GLOCKENSPIEL", 9),
    ("MUSIC_BOX", 10),
    ("VIBRAPHONE", 11),
    ("MARIMBA", 12),
    ("XYLOPHONE", 13),
    ("TUBULAR_BELLS", 14),
    ("DULCIMER", 15),
    ("DRAWBAR_ORGAN", 16),
    ("PERCUSSIVE_ORGAN", 17),
    ("ROCK_ORGAN", 18),
    ("CHURCH_ORGAN", 19),
    ("REED_ORGAN", 20),
    ("ACCORDION", 21),
    ("HARMONICA", 22),
    ("TANGO_ACCORDION", 23),
    ("GUITAR", 24),
    ("NYLON_STRING_GUITAR", 24),
    ("STEEL_STRING_GUITAR", 25),
    ("ELECTRIC_JAZZ_GUITAR", 26),
    ("ELECTRIC_CLEAN_GUITAR", 27),
    ("ELECTRIC_MUTED_GUITAR", 28),
    ("OVERDRIVEN_GUITAR", 29),
    ("DISTORTION_GUITAR", 30),
    ("GUITAR_HARMONICS", 31),
    ("ACOUSTIC_BASS", 32),
    ("ELECTRIC_BASS_FINGER", 33),
    ("ELECTRIC_BASS_PICK", 34),
    ("FRETLESS_BASS", 35),
    ("SLAP_BASS_1", 36),
    ("SLAP_BASS_2", 37),
    ("SYNTH_BASS_1", 38),
    ("SYNTH_BASS_2", 39),
    ("VIOLIN", 40),
    ("VIOLA", 41),
    ("CELLO", 42),
    ("CONTRABASS", 43),
    ("TREMOLO_STRINGS", 44),
    ("PIZZICATO_STRINGS", 45),
    ("ORCHESTRAL_STRINGS", 46),
    ("TIMPANI", 47),
    ("STRING_ENSEMBLE_1", 48),
    ("STRING_ENSEMBLE_2", 49),
    ("SYNTH_STRINGS_1", 50),
    ("SYNTH_STRINGS_2", 51),
    ("CHOIR_AAHS", 52),
    ("VOICE_OOHS", 53),
    ("SYNTH_VOICE", 54),
    ("ORCHESTRA_HIT", 55),
    ("TRUMPET", 56),
    ("TROMBONE", 57),
    ("TUBA", 58),
    ("MUTED_TRUMPET", 59),
    ("FRENCH_HORN", 60),
    ("BRASS_SECTION", 61),
    ("SYNTH_BRASS_1", 62),
    ("SYNTH_BRASS_2", 63),
    ("SOPRANO_SAX", 64),
    ("ALTO_SAX", 65),
    ("TENOR_SAX", 66),
    ("BARITONE_SAX", 67),
    ("OBOE", 68),
    ("ENGLISH_HORN", 69),
    ("BASSOON", 70),
    ("CLARINET", 71),
    ("PICCOLO", 72),
    ("FLUTE", 73),
    ("RECORDER", 74),
    ("PAN_FLUTE", 75),
    ("BLOWN_BOTTLE", 76),
    ("SHAKUHACHI", 77),
    ("WHISTLE", 78),
    ("OCARINA", 79),
    ("SQUARE", 80),
    ("SAWTOOTH", 81),
    ("CALLIOPE", 82),
    ("CHIFF", 83),
    ("CHARANG", 84),
    ("VOICE", 85),
    ("FIFTHS", 86),
    ("BASSLEAD", 87),
    ("NEW_AGE", 88),
    ("WARM", 89),
    ("POLYSYNTH", 90),
    ("CHOIR", 91),
    ("BOWED", 92),
    ("METALLIC", 93),
    ("HALO", 94),
    ("SWEEP", 95),
    ("RAIN", 96),
    ("SOUNDTRACK", 97),
    ("CRYSTAL", 98),
    ("ATMOSPHERE", 99),
    ("BRIGHTNESS", 100),
    ("GOBLIN", 101),
    ("ECHOES", 102),
    ("SCI_FI", 103),
    ("SITAR", 104),
    ("BANJO", 105),
    ("SHAMISEN", 106),
    ("KOTO", 107),
    ("KALIMBA", 108),
    ("BAGPIPE", 109),
    ("FIDDLE", 110),
    ("SHANAI", 111),
    ("TINKLE_BELL", 112),
    ("AGOGO", 113),
    ("STEEL_DRUMS", 114),
    ("WOODBLOCK", 115),
    ("TAIKO_DRUM", 116),
    ("MELODIC_TOM", 117),
    ("SYNTH_DRUM", 118),
    ("REVERSE_CYMBAL", 119),
    ("GUITAR_FRET_NOISE", 120),
    ("BREATH_NOISE", 121),
    ("SEASHORE", 122),
    ("BIRD_TWEET", 123),
    ("TELEPHONE_RING", 124),
    ("HELICOPTER", 125),
    ("APPLAUSE", 126),
    ("GUNSHOT", 127),
];

/// General MIDI percussion key numbers (voice 9)
pub const PERCUSSION: &[(&str, u16)] = &[
    ("ACOUSTIC_BASS_DRUM", 35),
    ("BASS_DRUM", 36),
    ("SIDE_STICK", 37),
    ("ACOUSTIC_SNARE", 38),
    ("HAND_CLAP", 39),
    ("ELECTRIC_SNARE", 40),
    ("LOW_FLOOR_TOM", 41),
    ("CLOSED_HI_HAT", 42),
    ("HIGH_FLOOR_TOM", 43),
    ("PEDAL_HI_HAT", 44),
    ("LOW_TOM", 45),
    ("OPEN_HI_HAT", 46),
    ("LOW_MID_TOM", 47),
    ("HI_MID_TOM", 48),
    ("CRASH_CYMBAL_1", 49),
    ("HIGH_TOM", 50),
    ("RIDE_CYMBAL_1", 51),
    ("CHINESE_CYMBAL", 52),
    ("RIDE_BELL", 53),
    ("TAMBOURINE", 54),
    ("SPLASH_CYMBAL", 55),
    ("COWBELL", 56),
    ("CRASH_CYMBAL_2", 57),
    ("VIBRASLAP", 58),
    ("RIDE_CYMBAL_2", 59),
    ("HI_BONGO", 60),
    ("LOW_BONGO", 61),
    ("MUTE_HI_CONGA", 62),
    ("OPEN_HI_CONGA", 63),
    ("LOW_CONGA", 64),
    ("HIGH_TIMBALE", 65),
    ("LOW_TIMBALE", 66),
    ("HIGH_AGOGO", 67),
    ("LOW_AGOGO", 68),
    ("CABASA", 69),
    ("MARACAS", 70),
    ("SHORT_WHISTLE", 71),
    ("LONG_WHISTLE", 72),
    ("SHORT_GUIRO", 73),
    ("LONG_GUIRO", 74),
    ("CLAVES", 75),
    ("HI_WOOD_BLOCK", 76),
    ("LOW_WOOD_BLOCK", 77),
    ("MUTE_CUICA", 78),
    ("OPEN_CUICA", 79),
    ("MUTE_TRIANGLE", 80),
    ("OPEN_TRIANGLE", 81),
];

/// MIDI controller numbers. Entries above 127 combine a coarse and a fine
/// controller as `coarse * 128 + fine`.
pub const CONTROLLERS: &[(&str, u16)] = &[
    ("BANK_SELECT_COARSE", 0),
    ("MOD_WHEEL_COARSE", 1),
    ("BREATH_COARSE", 2),
    ("FOOT_PEDAL_COARSE", 4),
    ("PORTAMENTO_TIME_COARSE", 5),
    ("DATA_ENTRY_COARSE", 6),
    ("VOLUME_COARSE", 7),
    ("BALANCE_COARSE", 8),
    ("PAN_POSITION_COARSE", 10),
    ("EXPRESSION_COARSE", 11),
    ("EFFECT_CONTROL_1_COARSE", 12),
    ("EFFECT_CONTROL_2_COARSE", 13),
    ("SLIDER_1", 16),
    ("SLIDER_2", 17),
    ("SLIDER_3", 18),
    ("SLIDER_4", 19),
    ("BANK_SELECT_FINE", 32),
    ("MOD_WHEEL_FINE", 33),
    ("BREATH_FINE", 34),
    ("FOOT_PEDAL_FINE", 36),
    ("PORTAMENTO_TIME_FINE", 37),
    ("DATA_ENTRY_FINE", 38),
    ("VOLUME_FINE", 39),
    ("BALANCE_FINE", 40),
    ("PAN_POSITION_FINE", 42),
    ("EXPRESSION_FINE", 43),
    ("EFFECT_CONTROL_1_FINE", 44),
    ("EFFECT_CONTROL_2_FINE", 45),
    ("HOLD_PEDAL", 64),
    ("HOLD", 64),
    ("PORTAMENTO", 65),
    ("SOSTENUTO_PEDAL", 66),
    ("SOSTENUTO", 66),
    ("SOFT_PEDAL", 67),
    ("SOFT", 67),
    ("LEGATO_PEDAL", 68),
    ("LEGATO", 68),
    ("HOLD_2_PEDAL", 69),
    ("HOLD_2", 69),
    ("SOUND_VARIATION", 70),
    ("VARIATION", 70),
    ("SOUND_TIMBRE", 71),
    ("TIMBRE", 71),
    ("SOUND_RELEASE_TIME", 72),
    ("RELEASE_TIME", 72),
    ("SOUND_ATTACK_TIME", 73),
    ("ATTACK_TIME", 73),
    ("SOUND_BRIGHTNESS", 74),
    ("SOUND_CONTROL_6", 75),
    ("SOUND_CONTROL_7", 76),
    ("SOUND_CONTROL_8", 77),
    ("SOUND_CONTROL_9", 78),
    ("SOUND_CONTROL_10", 79),
    ("GENERAL_PURPOSE_BUTTON_1", 80),
    ("GENERAL_PURPOSE_BUTTON_2", 81),
    ("GENERAL_PURPOSE_BUTTON_3", 82),
    ("GENERAL_PURPOSE_BUTTON_4", 83),
    ("EFFECTS_LEVEL", 91),
    ("EFFECTS", 91),
    ("TREMOLO_LEVEL", 92),
    ("TREMOLO", 92),
    ("CHORUS_LEVEL", 93),
    ("CHORUS", 93),
    ("CELESTE_LEVEL", 94),
    ("CELESTE", 94),
    ("PHASER_LEVEL", 95),
    ("PHASER", 95),
    ("DATA_BUTTON_INCREMENT", 96),
    ("DATA_BUTTON_DECREMENT", 97),
    ("NON_REGISTERED_FINE", 98),
    ("NON_REGISTERED_COARSE", 99),
    ("REGISTERED_FINE", 100),
    ("REGISTERED_COARSE", 101),
    ("ALL_SOUND_OFF", 120),
    ("ALL_CONTROLLERS_OFF", 121),
    ("LOCAL_KEYBOARD", 122),
    ("ALL_NOTES_OFF", 123),
    ("OMNI_MODE_OFF", 124),
    ("OMNI_OFF", 124),
    ("OMNI_MODE_ON", 125),
    ("OMNI_ON", 125),
    ("MONO_OPERATION", 126),
    ("MONO", 126),
    ("POLY_OPERATION", 127),
    ("POLY", 127),
    // Combined coarse/fine pairs
    ("MOD_WHEEL", 161),
    ("BREATH", 290),
    ("FOOT_PEDAL", 548),
    ("PORTAMENTO_TIME", 677),
    ("DATA_ENTRY", 806),
    ("VOLUME", 935),
    ("BALANCE", 1064),
    ("PAN_POSITION", 1322),
    ("EXPRESSION", 1451),
    ("EFFECT_CONTROL_1", 1580),
    ("EFFECT_CONTROL_2", 1709),
    ("NON_REGISTERED", 12770),
    ("REGISTERED", 13028),
];

/// Named controller values
pub const CONTROLLER_VALUES: &[(&str, u16)] = &[("ON", 127), ("OFF", 0), ("DEFAULT", 64)];

/// Italian tempo markings in beats per minute
pub const TEMPOS: &[(&str, u16)] = &[
    ("GRAVE", 40),
    ("LARGO", 45),
    ("LARGHETTO", 50),
    ("LENTO", 55),
    ("ADAGIO", 60),
    ("ADAGIETTO", 65),
    ("ANDANTE", 70),
    ("ANDANTINO", 80),
    ("MODERATO", 95),
    ("ALLEGRETTO", 110),
    ("ALLEGRO", 120),
    ("VIVACE", 145),
    ("PRESTO", 180),
    ("PRESTISSIMO", 220),
];

pub const ALL: &[&[(&str, u16)]] =
    &[INSTRUMENTS, PERCUSSION, CONTROLLERS, CONTROLLER_VALUES, TEMPOS];
