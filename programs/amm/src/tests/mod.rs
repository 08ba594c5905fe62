mod record_sizes;
