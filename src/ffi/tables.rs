//! Function tables for the FMOD Core API.

use libc::{c_char, c_float, c_int, c_longlong, c_uint, c_ulonglong, c_void};
use libloading::Library;

use super::library::{resolve, Func};
use super::*;

function_table! {
    /// Free functions outside any class.
    pub struct GlobalFns {
        debug_initialize = "Debug_Initialize":
            fn(FMOD_DEBUG_FLAGS, FMOD_DEBUG_MODE, FMOD_DEBUG_CALLBACK, *const c_char);
        memory_get_stats = "Memory_GetStats": fn(*mut c_int, *mut c_int, FMOD_BOOL);
    }
}

function_table! {
    pub struct SystemFns {
        create = "Create": fn(*mut *mut FMOD_SYSTEM, c_uint);
        release = "Release": fn(*mut FMOD_SYSTEM);
        set_output = "SetOutput": fn(*mut FMOD_SYSTEM, FMOD_OUTPUTTYPE);
        get_output = "GetOutput": fn(*mut FMOD_SYSTEM, *mut FMOD_OUTPUTTYPE);
        get_num_drivers = "GetNumDrivers": fn(*mut FMOD_SYSTEM, *mut c_int);
        get_driver_info = "GetDriverInfo": fn(
            *mut FMOD_SYSTEM, c_int, *mut c_char, c_int, *mut FMOD_GUID,
            *mut c_int, *mut FMOD_SPEAKERMODE, *mut c_int
        );
        set_driver = "SetDriver": fn(*mut FMOD_SYSTEM, c_int);
        get_driver = "GetDriver": fn(*mut FMOD_SYSTEM, *mut c_int);
        set_software_channels = "SetSoftwareChannels": fn(*mut FMOD_SYSTEM, c_int);
        get_software_channels = "GetSoftwareChannels": fn(*mut FMOD_SYSTEM, *mut c_int);
        set_software_format = "SetSoftwareFormat":
            fn(*mut FMOD_SYSTEM, c_int, FMOD_SPEAKERMODE, c_int);
        get_software_format = "GetSoftwareFormat":
            fn(*mut FMOD_SYSTEM, *mut c_int, *mut FMOD_SPEAKERMODE, *mut c_int);
        set_dsp_buffer_size = "SetDSPBufferSize": fn(*mut FMOD_SYSTEM, c_uint, c_int);
        get_dsp_buffer_size = "GetDSPBufferSize": fn(*mut FMOD_SYSTEM, *mut c_uint, *mut c_int);
        set_stream_buffer_size = "SetStreamBufferSize":
            fn(*mut FMOD_SYSTEM, c_uint, FMOD_TIMEUNIT);
        get_stream_buffer_size = "GetStreamBufferSize":
            fn(*mut FMOD_SYSTEM, *mut c_uint, *mut FMOD_TIMEUNIT);
        get_speaker_mode_channels = "GetSpeakerModeChannels":
            fn(*mut FMOD_SYSTEM, FMOD_SPEAKERMODE, *mut c_int);
        init = "Init": fn(*mut FMOD_SYSTEM, c_int, FMOD_INITFLAGS, *mut c_void);
        close = "Close": fn(*mut FMOD_SYSTEM);
        update = "Update": fn(*mut FMOD_SYSTEM);
        mixer_suspend = "MixerSuspend": fn(*mut FMOD_SYSTEM);
        mixer_resume = "MixerResume": fn(*mut FMOD_SYSTEM);
        get_version = "GetVersion": fn(*mut FMOD_SYSTEM, *mut c_uint);
        get_channels_playing = "GetChannelsPlaying": fn(*mut FMOD_SYSTEM, *mut c_int, *mut c_int);
        get_cpu_usage = "GetCPUUsage": fn(*mut FMOD_SYSTEM, *mut FMOD_CPU_USAGE);
        get_file_usage = "GetFileUsage":
            fn(*mut FMOD_SYSTEM, *mut c_longlong, *mut c_longlong, *mut c_longlong);
        set_3d_settings = "Set3DSettings": fn(*mut FMOD_SYSTEM, c_float, c_float, c_float);
        get_3d_settings = "Get3DSettings":
            fn(*mut FMOD_SYSTEM, *mut c_float, *mut c_float, *mut c_float);
        set_3d_num_listeners = "Set3DNumListeners": fn(*mut FMOD_SYSTEM, c_int);
        get_3d_num_listeners = "Get3DNumListeners": fn(*mut FMOD_SYSTEM, *mut c_int);
        set_3d_listener_attributes = "Set3DListenerAttributes": fn(
            *mut FMOD_SYSTEM, c_int, *const FMOD_VECTOR, *const FMOD_VECTOR,
            *const FMOD_VECTOR, *const FMOD_VECTOR
        );
        get_3d_listener_attributes = "Get3DListenerAttributes": fn(
            *mut FMOD_SYSTEM, c_int, *mut FMOD_VECTOR, *mut FMOD_VECTOR,
            *mut FMOD_VECTOR, *mut FMOD_VECTOR
        );
        create_sound = "CreateSound": fn(
            *mut FMOD_SYSTEM, *const c_char, FMOD_MODE, *mut FMOD_CREATESOUNDEXINFO,
            *mut *mut FMOD_SOUND
        );
        create_stream = "CreateStream": fn(
            *mut FMOD_SYSTEM, *const c_char, FMOD_MODE, *mut FMOD_CREATESOUNDEXINFO,
            *mut *mut FMOD_SOUND
        );
        create_dsp_by_type = "CreateDSPByType":
            fn(*mut FMOD_SYSTEM, FMOD_DSP_TYPE, *mut *mut FMOD_DSP);
        create_channel_group = "CreateChannelGroup":
            fn(*mut FMOD_SYSTEM, *const c_char, *mut *mut FMOD_CHANNELGROUP);
        create_sound_group = "CreateSoundGroup":
            fn(*mut FMOD_SYSTEM, *const c_char, *mut *mut FMOD_SOUNDGROUP);
        create_reverb_3d = "CreateReverb3D": fn(*mut FMOD_SYSTEM, *mut *mut FMOD_REVERB3D);
        play_sound = "PlaySound": fn(
            *mut FMOD_SYSTEM, *mut FMOD_SOUND, *mut FMOD_CHANNELGROUP, FMOD_BOOL,
            *mut *mut FMOD_CHANNEL
        );
        play_dsp = "PlayDSP": fn(
            *mut FMOD_SYSTEM, *mut FMOD_DSP, *mut FMOD_CHANNELGROUP, FMOD_BOOL,
            *mut *mut FMOD_CHANNEL
        );
        get_channel = "GetChannel": fn(*mut FMOD_SYSTEM, c_int, *mut *mut FMOD_CHANNEL);
        get_master_channel_group = "GetMasterChannelGroup":
            fn(*mut FMOD_SYSTEM, *mut *mut FMOD_CHANNELGROUP);
        get_master_sound_group = "GetMasterSoundGroup":
            fn(*mut FMOD_SYSTEM, *mut *mut FMOD_SOUNDGROUP);
        set_reverb_properties = "SetReverbProperties":
            fn(*mut FMOD_SYSTEM, c_int, *const FMOD_REVERB_PROPERTIES);
        get_reverb_properties = "GetReverbProperties":
            fn(*mut FMOD_SYSTEM, c_int, *mut FMOD_REVERB_PROPERTIES);
        lock_dsp = "LockDSP": fn(*mut FMOD_SYSTEM);
        unlock_dsp = "UnlockDSP": fn(*mut FMOD_SYSTEM);
        get_record_num_drivers = "GetRecordNumDrivers":
            fn(*mut FMOD_SYSTEM, *mut c_int, *mut c_int);
        get_record_driver_info = "GetRecordDriverInfo": fn(
            *mut FMOD_SYSTEM, c_int, *mut c_char, c_int, *mut FMOD_GUID, *mut c_int,
            *mut FMOD_SPEAKERMODE, *mut c_int, *mut FMOD_DRIVER_STATE
        );
        get_record_position = "GetRecordPosition": fn(*mut FMOD_SYSTEM, c_int, *mut c_uint);
        record_start = "RecordStart": fn(*mut FMOD_SYSTEM, c_int, *mut FMOD_SOUND, FMOD_BOOL);
        record_stop = "RecordStop": fn(*mut FMOD_SYSTEM, c_int);
        is_recording = "IsRecording": fn(*mut FMOD_SYSTEM, c_int, *mut FMOD_BOOL);
        create_geometry = "CreateGeometry":
            fn(*mut FMOD_SYSTEM, c_int, c_int, *mut *mut FMOD_GEOMETRY);
        set_geometry_settings = "SetGeometrySettings": fn(*mut FMOD_SYSTEM, c_float);
        get_geometry_settings = "GetGeometrySettings": fn(*mut FMOD_SYSTEM, *mut c_float);
        load_geometry = "LoadGeometry":
            fn(*mut FMOD_SYSTEM, *const c_void, c_int, *mut *mut FMOD_GEOMETRY);
        get_geometry_occlusion = "GetGeometryOcclusion": fn(
            *mut FMOD_SYSTEM, *const FMOD_VECTOR, *const FMOD_VECTOR, *mut c_float, *mut c_float
        );
        set_network_proxy = "SetNetworkProxy": fn(*mut FMOD_SYSTEM, *const c_char);
        get_network_proxy = "GetNetworkProxy": fn(*mut FMOD_SYSTEM, *mut c_char, c_int);
        set_network_timeout = "SetNetworkTimeout": fn(*mut FMOD_SYSTEM, c_int);
        get_network_timeout = "GetNetworkTimeout": fn(*mut FMOD_SYSTEM, *mut c_int);
    }
}

function_table! {
    /// Operations shared by channels and channel groups.
    ///
    /// Instantiated once per prefix (`FMOD_Channel_`, `FMOD_ChannelGroup_`).
    pub struct ControlFns<T> {
        get_system_object = "GetSystemObject": fn(*mut T, *mut *mut FMOD_SYSTEM);
        stop = "Stop": fn(*mut T);
        set_paused = "SetPaused": fn(*mut T, FMOD_BOOL);
        get_paused = "GetPaused": fn(*mut T, *mut FMOD_BOOL);
        set_volume = "SetVolume": fn(*mut T, c_float);
        get_volume = "GetVolume": fn(*mut T, *mut c_float);
        set_volume_ramp = "SetVolumeRamp": fn(*mut T, FMOD_BOOL);
        get_volume_ramp = "GetVolumeRamp": fn(*mut T, *mut FMOD_BOOL);
        get_audibility = "GetAudibility": fn(*mut T, *mut c_float);
        set_pitch = "SetPitch": fn(*mut T, c_float);
        get_pitch = "GetPitch": fn(*mut T, *mut c_float);
        set_mute = "SetMute": fn(*mut T, FMOD_BOOL);
        get_mute = "GetMute": fn(*mut T, *mut FMOD_BOOL);
        set_reverb_properties = "SetReverbProperties": fn(*mut T, c_int, c_float);
        get_reverb_properties = "GetReverbProperties": fn(*mut T, c_int, *mut c_float);
        set_low_pass_gain = "SetLowPassGain": fn(*mut T, c_float);
        get_low_pass_gain = "GetLowPassGain": fn(*mut T, *mut c_float);
        set_mode = "SetMode": fn(*mut T, FMOD_MODE);
        get_mode = "GetMode": fn(*mut T, *mut FMOD_MODE);
        set_callback = "SetCallback": fn(*mut T, FMOD_CHANNELCONTROL_CALLBACK);
        is_playing = "IsPlaying": fn(*mut T, *mut FMOD_BOOL);
        set_pan = "SetPan": fn(*mut T, c_float);
        set_mix_levels_output = "SetMixLevelsOutput": fn(
            *mut T, c_float, c_float, c_float, c_float, c_float, c_float, c_float, c_float
        );
        set_mix_levels_input = "SetMixLevelsInput": fn(*mut T, *mut c_float, c_int);
        set_mix_matrix = "SetMixMatrix": fn(*mut T, *mut c_float, c_int, c_int, c_int);
        get_mix_matrix = "GetMixMatrix":
            fn(*mut T, *mut c_float, *mut c_int, *mut c_int, c_int);
        get_dsp_clock = "GetDSPClock": fn(*mut T, *mut c_ulonglong, *mut c_ulonglong);
        set_delay = "SetDelay": fn(*mut T, c_ulonglong, c_ulonglong, FMOD_BOOL);
        get_delay = "GetDelay":
            fn(*mut T, *mut c_ulonglong, *mut c_ulonglong, *mut FMOD_BOOL);
        add_fade_point = "AddFadePoint": fn(*mut T, c_ulonglong, c_float);
        set_fade_point_ramp = "SetFadePointRamp": fn(*mut T, c_ulonglong, c_float);
        remove_fade_points = "RemoveFadePoints": fn(*mut T, c_ulonglong, c_ulonglong);
        get_fade_points = "GetFadePoints":
            fn(*mut T, *mut c_uint, *mut c_ulonglong, *mut c_float);
        get_dsp = "GetDSP": fn(*mut T, c_int, *mut *mut FMOD_DSP);
        add_dsp = "AddDSP": fn(*mut T, c_int, *mut FMOD_DSP);
        remove_dsp = "RemoveDSP": fn(*mut T, *mut FMOD_DSP);
        get_num_dsps = "GetNumDSPs": fn(*mut T, *mut c_int);
        set_dsp_index = "SetDSPIndex": fn(*mut T, *mut FMOD_DSP, c_int);
        get_dsp_index = "GetDSPIndex": fn(*mut T, *mut FMOD_DSP, *mut c_int);
        set_3d_attributes = "Set3DAttributes":
            fn(*mut T, *const FMOD_VECTOR, *const FMOD_VECTOR);
        get_3d_attributes = "Get3DAttributes": fn(*mut T, *mut FMOD_VECTOR, *mut FMOD_VECTOR);
        set_3d_min_max_distance = "Set3DMinMaxDistance": fn(*mut T, c_float, c_float);
        get_3d_min_max_distance = "Get3DMinMaxDistance":
            fn(*mut T, *mut c_float, *mut c_float);
        set_3d_cone_settings = "Set3DConeSettings": fn(*mut T, c_float, c_float, c_float);
        get_3d_cone_settings = "Get3DConeSettings":
            fn(*mut T, *mut c_float, *mut c_float, *mut c_float);
        set_3d_cone_orientation = "Set3DConeOrientation": fn(*mut T, *mut FMOD_VECTOR);
        get_3d_cone_orientation = "Get3DConeOrientation": fn(*mut T, *mut FMOD_VECTOR);
        set_3d_custom_rolloff = "Set3DCustomRolloff": fn(*mut T, *mut FMOD_VECTOR, c_int);
        get_3d_custom_rolloff = "Get3DCustomRolloff":
            fn(*mut T, *mut *mut FMOD_VECTOR, *mut c_int);
        set_3d_occlusion = "Set3DOcclusion": fn(*mut T, c_float, c_float);
        get_3d_occlusion = "Get3DOcclusion": fn(*mut T, *mut c_float, *mut c_float);
        set_3d_spread = "Set3DSpread": fn(*mut T, c_float);
        get_3d_spread = "Get3DSpread": fn(*mut T, *mut c_float);
        set_3d_level = "Set3DLevel": fn(*mut T, c_float);
        get_3d_level = "Get3DLevel": fn(*mut T, *mut c_float);
        set_3d_doppler_level = "Set3DDopplerLevel": fn(*mut T, c_float);
        get_3d_doppler_level = "Get3DDopplerLevel": fn(*mut T, *mut c_float);
        set_3d_distance_filter = "Set3DDistanceFilter": fn(*mut T, FMOD_BOOL, c_float, c_float);
        get_3d_distance_filter = "Get3DDistanceFilter":
            fn(*mut T, *mut FMOD_BOOL, *mut c_float, *mut c_float);
    }
}

function_table! {
    pub struct ChannelFns {
        set_frequency = "SetFrequency": fn(*mut FMOD_CHANNEL, c_float);
        get_frequency = "GetFrequency": fn(*mut FMOD_CHANNEL, *mut c_float);
        set_priority = "SetPriority": fn(*mut FMOD_CHANNEL, c_int);
        get_priority = "GetPriority": fn(*mut FMOD_CHANNEL, *mut c_int);
        set_position = "SetPosition": fn(*mut FMOD_CHANNEL, c_uint, FMOD_TIMEUNIT);
        get_position = "GetPosition": fn(*mut FMOD_CHANNEL, *mut c_uint, FMOD_TIMEUNIT);
        set_channel_group = "SetChannelGroup": fn(*mut FMOD_CHANNEL, *mut FMOD_CHANNELGROUP);
        get_channel_group = "GetChannelGroup":
            fn(*mut FMOD_CHANNEL, *mut *mut FMOD_CHANNELGROUP);
        set_loop_count = "SetLoopCount": fn(*mut FMOD_CHANNEL, c_int);
        get_loop_count = "GetLoopCount": fn(*mut FMOD_CHANNEL, *mut c_int);
        set_loop_points = "SetLoopPoints":
            fn(*mut FMOD_CHANNEL, c_uint, FMOD_TIMEUNIT, c_uint, FMOD_TIMEUNIT);
        get_loop_points = "GetLoopPoints":
            fn(*mut FMOD_CHANNEL, *mut c_uint, FMOD_TIMEUNIT, *mut c_uint, FMOD_TIMEUNIT);
        is_virtual = "IsVirtual": fn(*mut FMOD_CHANNEL, *mut FMOD_BOOL);
        get_current_sound = "GetCurrentSound": fn(*mut FMOD_CHANNEL, *mut *mut FMOD_SOUND);
        get_index = "GetIndex": fn(*mut FMOD_CHANNEL, *mut c_int);
    }
}

function_table! {
    pub struct ChannelGroupFns {
        release = "Release": fn(*mut FMOD_CHANNELGROUP);
        add_group = "AddGroup": fn(
            *mut FMOD_CHANNELGROUP, *mut FMOD_CHANNELGROUP, FMOD_BOOL,
            *mut *mut FMOD_DSPCONNECTION
        );
        get_num_groups = "GetNumGroups": fn(*mut FMOD_CHANNELGROUP, *mut c_int);
        get_group = "GetGroup": fn(*mut FMOD_CHANNELGROUP, c_int, *mut *mut FMOD_CHANNELGROUP);
        get_parent_group = "GetParentGroup":
            fn(*mut FMOD_CHANNELGROUP, *mut *mut FMOD_CHANNELGROUP);
        get_name = "GetName": fn(*mut FMOD_CHANNELGROUP, *mut c_char, c_int);
        get_num_channels = "GetNumChannels": fn(*mut FMOD_CHANNELGROUP, *mut c_int);
        get_channel = "GetChannel": fn(*mut FMOD_CHANNELGROUP, c_int, *mut *mut FMOD_CHANNEL);
    }
}

function_table! {
    pub struct SoundFns {
        release = "Release": fn(*mut FMOD_SOUND);
        get_system_object = "GetSystemObject": fn(*mut FMOD_SOUND, *mut *mut FMOD_SYSTEM);
        lock = "Lock": fn(
            *mut FMOD_SOUND, c_uint, c_uint, *mut *mut c_void, *mut *mut c_void,
            *mut c_uint, *mut c_uint
        );
        unlock = "Unlock": fn(*mut FMOD_SOUND, *mut c_void, *mut c_void, c_uint, c_uint);
        set_defaults = "SetDefaults": fn(*mut FMOD_SOUND, c_float, c_int);
        get_defaults = "GetDefaults": fn(*mut FMOD_SOUND, *mut c_float, *mut c_int);
        set_3d_min_max_distance = "Set3DMinMaxDistance": fn(*mut FMOD_SOUND, c_float, c_float);
        get_3d_min_max_distance = "Get3DMinMaxDistance":
            fn(*mut FMOD_SOUND, *mut c_float, *mut c_float);
        set_3d_cone_settings = "Set3DConeSettings":
            fn(*mut FMOD_SOUND, c_float, c_float, c_float);
        get_3d_cone_settings = "Get3DConeSettings":
            fn(*mut FMOD_SOUND, *mut c_float, *mut c_float, *mut c_float);
        set_3d_custom_rolloff = "Set3DCustomRolloff":
            fn(*mut FMOD_SOUND, *mut FMOD_VECTOR, c_int);
        get_3d_custom_rolloff = "Get3DCustomRolloff":
            fn(*mut FMOD_SOUND, *mut *mut FMOD_VECTOR, *mut c_int);
        get_sub_sound = "GetSubSound": fn(*mut FMOD_SOUND, c_int, *mut *mut FMOD_SOUND);
        get_sub_sound_parent = "GetSubSoundParent": fn(*mut FMOD_SOUND, *mut *mut FMOD_SOUND);
        get_name = "GetName": fn(*mut FMOD_SOUND, *mut c_char, c_int);
        get_length = "GetLength": fn(*mut FMOD_SOUND, *mut c_uint, FMOD_TIMEUNIT);
        get_format = "GetFormat": fn(
            *mut FMOD_SOUND, *mut FMOD_SOUND_TYPE, *mut FMOD_SOUND_FORMAT, *mut c_int, *mut c_int
        );
        get_num_sub_sounds = "GetNumSubSounds": fn(*mut FMOD_SOUND, *mut c_int);
        get_num_tags = "GetNumTags": fn(*mut FMOD_SOUND, *mut c_int, *mut c_int);
        get_tag = "GetTag": fn(*mut FMOD_SOUND, *const c_char, c_int, *mut FMOD_TAG);
        get_open_state = "GetOpenState": fn(
            *mut FMOD_SOUND, *mut FMOD_OPENSTATE, *mut c_uint, *mut FMOD_BOOL, *mut FMOD_BOOL
        );
        read_data = "ReadData": fn(*mut FMOD_SOUND, *mut c_void, c_uint, *mut c_uint);
        seek_data = "SeekData": fn(*mut FMOD_SOUND, c_uint);
        set_sound_group = "SetSoundGroup": fn(*mut FMOD_SOUND, *mut FMOD_SOUNDGROUP);
        get_sound_group = "GetSoundGroup": fn(*mut FMOD_SOUND, *mut *mut FMOD_SOUNDGROUP);
        get_num_sync_points = "GetNumSyncPoints": fn(*mut FMOD_SOUND, *mut c_int);
        get_sync_point = "GetSyncPoint": fn(*mut FMOD_SOUND, c_int, *mut *mut FMOD_SYNCPOINT);
        get_sync_point_info = "GetSyncPointInfo": fn(
            *mut FMOD_SOUND, *mut FMOD_SYNCPOINT, *mut c_char, c_int, *mut c_uint, FMOD_TIMEUNIT
        );
        add_sync_point = "AddSyncPoint": fn(
            *mut FMOD_SOUND, c_uint, FMOD_TIMEUNIT, *const c_char, *mut *mut FMOD_SYNCPOINT
        );
        delete_sync_point = "DeleteSyncPoint": fn(*mut FMOD_SOUND, *mut FMOD_SYNCPOINT);
        set_mode = "SetMode": fn(*mut FMOD_SOUND, FMOD_MODE);
        get_mode = "GetMode": fn(*mut FMOD_SOUND, *mut FMOD_MODE);
        set_loop_count = "SetLoopCount": fn(*mut FMOD_SOUND, c_int);
        get_loop_count = "GetLoopCount": fn(*mut FMOD_SOUND, *mut c_int);
        set_loop_points = "SetLoopPoints":
            fn(*mut FMOD_SOUND, c_uint, FMOD_TIMEUNIT, c_uint, FMOD_TIMEUNIT);
        get_loop_points = "GetLoopPoints":
            fn(*mut FMOD_SOUND, *mut c_uint, FMOD_TIMEUNIT, *mut c_uint, FMOD_TIMEUNIT);
        get_music_num_channels = "GetMusicNumChannels": fn(*mut FMOD_SOUND, *mut c_int);
        set_music_channel_volume = "SetMusicChannelVolume": fn(*mut FMOD_SOUND, c_int, c_float);
        get_music_channel_volume = "GetMusicChannelVolume":
            fn(*mut FMOD_SOUND, c_int, *mut c_float);
        set_music_speed = "SetMusicSpeed": fn(*mut FMOD_SOUND, c_float);
        get_music_speed = "GetMusicSpeed": fn(*mut FMOD_SOUND, *mut c_float);
    }
}

function_table! {
    pub struct SoundGroupFns {
        release = "Release": fn(*mut FMOD_SOUNDGROUP);
        get_system_object = "GetSystemObject": fn(*mut FMOD_SOUNDGROUP, *mut *mut FMOD_SYSTEM);
        set_max_audible = "SetMaxAudible": fn(*mut FMOD_SOUNDGROUP, c_int);
        get_max_audible = "GetMaxAudible": fn(*mut FMOD_SOUNDGROUP, *mut c_int);
        set_max_audible_behavior = "SetMaxAudibleBehavior":
            fn(*mut FMOD_SOUNDGROUP, FMOD_SOUNDGROUP_BEHAVIOR);
        get_max_audible_behavior = "GetMaxAudibleBehavior":
            fn(*mut FMOD_SOUNDGROUP, *mut FMOD_SOUNDGROUP_BEHAVIOR);
        set_mute_fade_speed = "SetMuteFadeSpeed": fn(*mut FMOD_SOUNDGROUP, c_float);
        get_mute_fade_speed = "GetMuteFadeSpeed": fn(*mut FMOD_SOUNDGROUP, *mut c_float);
        set_volume = "SetVolume": fn(*mut FMOD_SOUNDGROUP, c_float);
        get_volume = "GetVolume": fn(*mut FMOD_SOUNDGROUP, *mut c_float);
        stop = "Stop": fn(*mut FMOD_SOUNDGROUP);
        get_name = "GetName": fn(*mut FMOD_SOUNDGROUP, *mut c_char, c_int);
        get_num_sounds = "GetNumSounds": fn(*mut FMOD_SOUNDGROUP, *mut c_int);
        get_sound = "GetSound": fn(*mut FMOD_SOUNDGROUP, c_int, *mut *mut FMOD_SOUND);
        get_num_playing = "GetNumPlaying": fn(*mut FMOD_SOUNDGROUP, *mut c_int);
    }
}

function_table! {
    pub struct DspFns {
        release = "Release": fn(*mut FMOD_DSP);
        get_system_object = "GetSystemObject": fn(*mut FMOD_DSP, *mut *mut FMOD_SYSTEM);
        add_input = "AddInput": fn(
            *mut FMOD_DSP, *mut FMOD_DSP, *mut *mut FMOD_DSPCONNECTION, FMOD_DSPCONNECTION_TYPE
        );
        disconnect_from = "DisconnectFrom":
            fn(*mut FMOD_DSP, *mut FMOD_DSP, *mut FMOD_DSPCONNECTION);
        disconnect_all = "DisconnectAll": fn(*mut FMOD_DSP, FMOD_BOOL, FMOD_BOOL);
        get_num_inputs = "GetNumInputs": fn(*mut FMOD_DSP, *mut c_int);
        get_num_outputs = "GetNumOutputs": fn(*mut FMOD_DSP, *mut c_int);
        get_input = "GetInput":
            fn(*mut FMOD_DSP, c_int, *mut *mut FMOD_DSP, *mut *mut FMOD_DSPCONNECTION);
        get_output = "GetOutput":
            fn(*mut FMOD_DSP, c_int, *mut *mut FMOD_DSP, *mut *mut FMOD_DSPCONNECTION);
        set_active = "SetActive": fn(*mut FMOD_DSP, FMOD_BOOL);
        get_active = "GetActive": fn(*mut FMOD_DSP, *mut FMOD_BOOL);
        set_bypass = "SetBypass": fn(*mut FMOD_DSP, FMOD_BOOL);
        get_bypass = "GetBypass": fn(*mut FMOD_DSP, *mut FMOD_BOOL);
        set_wet_dry_mix = "SetWetDryMix": fn(*mut FMOD_DSP, c_float, c_float, c_float);
        get_wet_dry_mix = "GetWetDryMix":
            fn(*mut FMOD_DSP, *mut c_float, *mut c_float, *mut c_float);
        set_channel_format = "SetChannelFormat":
            fn(*mut FMOD_DSP, FMOD_CHANNELMASK, c_int, FMOD_SPEAKERMODE);
        get_channel_format = "GetChannelFormat":
            fn(*mut FMOD_DSP, *mut FMOD_CHANNELMASK, *mut c_int, *mut FMOD_SPEAKERMODE);
        get_output_channel_format = "GetOutputChannelFormat": fn(
            *mut FMOD_DSP, FMOD_CHANNELMASK, c_int, FMOD_SPEAKERMODE,
            *mut FMOD_CHANNELMASK, *mut c_int, *mut FMOD_SPEAKERMODE
        );
        reset = "Reset": fn(*mut FMOD_DSP);
        set_parameter_float = "SetParameterFloat": fn(*mut FMOD_DSP, c_int, c_float);
        set_parameter_int = "SetParameterInt": fn(*mut FMOD_DSP, c_int, c_int);
        set_parameter_bool = "SetParameterBool": fn(*mut FMOD_DSP, c_int, FMOD_BOOL);
        set_parameter_data = "SetParameterData": fn(*mut FMOD_DSP, c_int, *mut c_void, c_uint);
        get_parameter_float = "GetParameterFloat":
            fn(*mut FMOD_DSP, c_int, *mut c_float, *mut c_char, c_int);
        get_parameter_int = "GetParameterInt":
            fn(*mut FMOD_DSP, c_int, *mut c_int, *mut c_char, c_int);
        get_parameter_bool = "GetParameterBool":
            fn(*mut FMOD_DSP, c_int, *mut FMOD_BOOL, *mut c_char, c_int);
        get_parameter_data = "GetParameterData":
            fn(*mut FMOD_DSP, c_int, *mut *mut c_void, *mut c_uint, *mut c_char, c_int);
        get_num_parameters = "GetNumParameters": fn(*mut FMOD_DSP, *mut c_int);
        get_parameter_info = "GetParameterInfo":
            fn(*mut FMOD_DSP, c_int, *mut *mut FMOD_DSP_PARAMETER_DESC);
        get_data_parameter_index = "GetDataParameterIndex": fn(*mut FMOD_DSP, c_int, *mut c_int);
        get_info = "GetInfo": fn(
            *mut FMOD_DSP, *mut c_char, *mut c_uint, *mut c_int, *mut c_int, *mut c_int
        );
        get_type = "GetType": fn(*mut FMOD_DSP, *mut FMOD_DSP_TYPE);
        get_idle = "GetIdle": fn(*mut FMOD_DSP, *mut FMOD_BOOL);
        set_metering_enabled = "SetMeteringEnabled": fn(*mut FMOD_DSP, FMOD_BOOL, FMOD_BOOL);
        get_metering_enabled = "GetMeteringEnabled":
            fn(*mut FMOD_DSP, *mut FMOD_BOOL, *mut FMOD_BOOL);
        get_metering_info = "GetMeteringInfo":
            fn(*mut FMOD_DSP, *mut FMOD_DSP_METERING_INFO, *mut FMOD_DSP_METERING_INFO);
        get_cpu_usage = "GetCPUUsage": fn(*mut FMOD_DSP, *mut c_uint, *mut c_uint);
    }
}

function_table! {
    pub struct DspConnectionFns {
        get_input = "GetInput": fn(*mut FMOD_DSPCONNECTION, *mut *mut FMOD_DSP);
        get_output = "GetOutput": fn(*mut FMOD_DSPCONNECTION, *mut *mut FMOD_DSP);
        set_mix = "SetMix": fn(*mut FMOD_DSPCONNECTION, c_float);
        get_mix = "GetMix": fn(*mut FMOD_DSPCONNECTION, *mut c_float);
        set_mix_matrix = "SetMixMatrix":
            fn(*mut FMOD_DSPCONNECTION, *mut c_float, c_int, c_int, c_int);
        get_mix_matrix = "GetMixMatrix":
            fn(*mut FMOD_DSPCONNECTION, *mut c_float, *mut c_int, *mut c_int, c_int);
        get_type = "GetType": fn(*mut FMOD_DSPCONNECTION, *mut FMOD_DSPCONNECTION_TYPE);
    }
}

function_table! {
    pub struct GeometryFns {
        release = "Release": fn(*mut FMOD_GEOMETRY);
        add_polygon = "AddPolygon": fn(
            *mut FMOD_GEOMETRY, c_float, c_float, FMOD_BOOL, c_int, *const FMOD_VECTOR, *mut c_int
        );
        get_num_polygons = "GetNumPolygons": fn(*mut FMOD_GEOMETRY, *mut c_int);
        get_max_polygons = "GetMaxPolygons": fn(*mut FMOD_GEOMETRY, *mut c_int, *mut c_int);
        get_polygon_num_vertices = "GetPolygonNumVertices":
            fn(*mut FMOD_GEOMETRY, c_int, *mut c_int);
        set_polygon_vertex = "SetPolygonVertex":
            fn(*mut FMOD_GEOMETRY, c_int, c_int, *const FMOD_VECTOR);
        get_polygon_vertex = "GetPolygonVertex":
            fn(*mut FMOD_GEOMETRY, c_int, c_int, *mut FMOD_VECTOR);
        set_polygon_attributes = "SetPolygonAttributes":
            fn(*mut FMOD_GEOMETRY, c_int, c_float, c_float, FMOD_BOOL);
        get_polygon_attributes = "GetPolygonAttributes":
            fn(*mut FMOD_GEOMETRY, c_int, *mut c_float, *mut c_float, *mut FMOD_BOOL);
        set_active = "SetActive": fn(*mut FMOD_GEOMETRY, FMOD_BOOL);
        get_active = "GetActive": fn(*mut FMOD_GEOMETRY, *mut FMOD_BOOL);
        set_rotation = "SetRotation":
            fn(*mut FMOD_GEOMETRY, *const FMOD_VECTOR, *const FMOD_VECTOR);
        get_rotation = "GetRotation": fn(*mut FMOD_GEOMETRY, *mut FMOD_VECTOR, *mut FMOD_VECTOR);
        set_position = "SetPosition": fn(*mut FMOD_GEOMETRY, *const FMOD_VECTOR);
        get_position = "GetPosition": fn(*mut FMOD_GEOMETRY, *mut FMOD_VECTOR);
        set_scale = "SetScale": fn(*mut FMOD_GEOMETRY, *const FMOD_VECTOR);
        get_scale = "GetScale": fn(*mut FMOD_GEOMETRY, *mut FMOD_VECTOR);
        save = "Save": fn(*mut FMOD_GEOMETRY, *mut c_void, *mut c_int);
    }
}

function_table! {
    pub struct Reverb3dFns {
        release = "Release": fn(*mut FMOD_REVERB3D);
        set_3d_attributes = "Set3DAttributes":
            fn(*mut FMOD_REVERB3D, *const FMOD_VECTOR, c_float, c_float);
        get_3d_attributes = "Get3DAttributes":
            fn(*mut FMOD_REVERB3D, *mut FMOD_VECTOR, *mut c_float, *mut c_float);
        set_properties = "SetProperties": fn(*mut FMOD_REVERB3D, *const FMOD_REVERB_PROPERTIES);
        get_properties = "GetProperties": fn(*mut FMOD_REVERB3D, *mut FMOD_REVERB_PROPERTIES);
        set_active = "SetActive": fn(*mut FMOD_REVERB3D, FMOD_BOOL);
        get_active = "GetActive": fn(*mut FMOD_REVERB3D, *mut FMOD_BOOL);
    }
}
